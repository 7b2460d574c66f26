// Rejected intents and malformed frames

use std::time::Duration;

use tilegame::state::app_state::AppState;
use tilegame_test_support::unique_helpers::unique_player_id;
use uuid::Uuid;

use crate::support::websocket::{road_deck, seat_two_players, start_test_server};
use crate::support::websocket_client::{intent, make_move, WebSocketClient};

#[actix_web::test]
async fn malformed_message_keeps_socket_open() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(AppState::default())?;
    let game_id = server.create_game(&road_deck(4));
    let mut client = WebSocketClient::connect_retry(&server.ws_url(), Duration::from_secs(1)).await?;

    client.send("{not json").await?;
    let err = client.recv_error().await?;
    assert_eq!(err["code"], "BAD_REQUEST");
    assert!(err["message"].as_str().is_some_and(|m| !m.is_empty()));

    client
        .send(r#"{"type":"teleport","gameId":"x","playerId":"y"}"#)
        .await?;
    assert_eq!(client.recv_error().await?["code"], "BAD_REQUEST");

    client.send_binary(vec![1, 2, 3]).await?;
    assert_eq!(client.recv_error().await?["code"], "BAD_REQUEST");

    // Still usable afterwards.
    let game = client.join(game_id, &unique_player_id("alice")).await?;
    assert_eq!(game["players"], 1);

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn join_unknown_game() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(AppState::default())?;
    let mut client = WebSocketClient::connect_retry(&server.ws_url(), Duration::from_secs(1)).await?;

    client
        .send_json(&intent("join_game", Uuid::new_v4(), "alice"))
        .await?;
    let err = client.recv_error().await?;
    assert_eq!(err["code"], "GAME_NOT_FOUND");
    assert_eq!(server.registry().active_connections_count(), 0);

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn third_player_is_turned_away() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(AppState::default())?;
    let ((alice, _a), (_, _b)) = seat_two_players(&server, &road_deck(4)).await?;

    let mut carol = WebSocketClient::connect_retry(&server.ws_url(), Duration::from_secs(1)).await?;
    carol
        .send_json(&intent("join_game", alice.game_id, &unique_player_id("carol")))
        .await?;
    assert_eq!(carol.recv_error().await?["code"], "GAME_FULL");

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn out_of_turn_move_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(AppState::default())?;
    let ((_, mut a), (bob, mut b)) = seat_two_players(&server, &road_deck(4)).await?;

    b.send_json(&make_move(bob.game_id, &bob.player_id, 1, 2, "RRRR", 0))
        .await?;
    assert_eq!(b.recv_error().await?["code"], "NOT_YOUR_TURN");

    b.send_json(&intent("rotate_tile", bob.game_id, &bob.player_id))
        .await?;
    assert_eq!(b.recv_error().await?["code"], "NOT_YOUR_TURN");

    assert!(a.recv_timeout(Duration::from_millis(200)).await.is_err());
    let game = server.registry().snapshot(bob.game_id)?;
    assert_eq!(game.current_player, Some(0));
    assert_eq!(game.board.placed_count(), 0);

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn cannot_act_for_another_player() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(AppState::default())?;
    let ((alice, _a), (_, mut b)) = seat_two_players(&server, &road_deck(4)).await?;

    // Bob's socket claims to be Alice, who holds the turn.
    b.send_json(&intent("skip_turn", alice.game_id, &alice.player_id))
        .await?;
    assert_eq!(b.recv_error().await?["code"], "NOT_YOUR_TURN");

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn illegal_placements_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(AppState::default())?;
    let ((alice, mut a), _bob) = seat_two_players(&server, &road_deck(4)).await?;
    let (game_id, me) = (alice.game_id, alice.player_id.as_str());

    // Isolated interior cell.
    a.send_json(&make_move(game_id, me, 5, 5, "RRRR", 0)).await?;
    assert_eq!(a.recv_error().await?["code"], "INVALID_PLACEMENT");

    // Border ring.
    a.send_json(&make_move(game_id, me, 0, 1, "RRRR", 0)).await?;
    assert_eq!(a.recv_error().await?["code"], "INVALID_PLACEMENT");

    // Off the board.
    a.send_json(&make_move(game_id, me, 10, 3, "RRRR", 0)).await?;
    assert_eq!(a.recv_error().await?["code"], "INVALID_PLACEMENT");

    // Not the tile being held.
    a.send_json(&make_move(game_id, me, 1, 2, "CCCC", 0)).await?;
    assert_eq!(a.recv_error().await?["code"], "INVALID_PLACEMENT");

    let game = server.registry().snapshot(game_id)?;
    assert_eq!(game.scores, [0, 0]);
    assert_eq!(game.current_player, Some(0));

    server.stop().await;
    Ok(())
}
