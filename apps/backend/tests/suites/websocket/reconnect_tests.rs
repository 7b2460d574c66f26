// Disconnect and rejoin by player id

use std::time::Duration;

use tilegame::state::app_state::AppState;

use crate::support::websocket::{road_deck, seat_two_players, start_test_server, wait_for_connections};
use crate::support::websocket_client::{intent, WebSocketClient};

#[actix_web::test]
async fn leaving_player_hands_over_turn() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(AppState::default())?;
    let ((_, mut a), (bob, mut b)) = seat_two_players(&server, &road_deck(4)).await?;

    a.close().await?;
    let game = b.recv_state().await?;
    assert_eq!(game["status"], "disconnected");
    assert_eq!(game["currentPlayer"], 1);

    // Bob keeps playing while Alice is away.
    b.send_json(&intent("skip_turn", bob.game_id, &bob.player_id))
        .await?;
    let game = b.recv_state().await?;
    assert_eq!(game["currentPlayer"], 1);

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn rejoin_restores_active_game() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(AppState::default())?;
    let ((alice, mut a), (_, mut b)) = seat_two_players(&server, &road_deck(4)).await?;

    a.close().await?;
    assert_eq!(b.recv_state().await?["status"], "disconnected");
    wait_for_connections(&server.registry(), 1, Duration::from_secs(2)).await?;

    let mut again = WebSocketClient::connect_retry(&server.ws_url(), Duration::from_secs(1)).await?;
    let game = again.join(alice.game_id, &alice.player_id).await?;
    assert_eq!(game["status"], "active");
    assert_eq!(game["players"], 2);

    let seen_by_b = b.recv_state().await?;
    assert_eq!(seen_by_b, game);

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn waiting_game_stays_waiting_on_leave() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(AppState::default())?;
    let game_id = server.create_game(&road_deck(4));

    let mut a = WebSocketClient::connect_retry(&server.ws_url(), Duration::from_secs(1)).await?;
    a.join(game_id, "alice").await?;
    a.close().await?;
    wait_for_connections(&server.registry(), 0, Duration::from_secs(2)).await?;

    let game = server.registry().snapshot(game_id)?;
    assert_eq!(game.status, tilegame::domain::GameStatus::Waiting);
    assert_eq!(game.players, 1);

    server.stop().await;
    Ok(())
}
