// WebSocket client utilities for testing

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use uuid::Uuid;

pub const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// WebSocket test client
pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    /// Connect to a WebSocket endpoint, retrying until success or timeout.
    pub async fn connect_retry(
        url: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let start = tokio::time::Instant::now();
        loop {
            match connect_async(url).await {
                Ok((stream, _)) => return Ok(Self { stream }),
                Err(err) => {
                    if start.elapsed() >= timeout {
                        return Err(Box::new(err));
                    }
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            }
        }
    }

    /// Receive the next message with a timeout
    pub async fn recv_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Message>, Box<dyn std::error::Error>> {
        tokio::time::timeout(timeout, self.stream.next())
            .await
            .map_err(|_| "Timeout waiting for message")?
            .transpose()
            .map_err(|e| e.into())
    }

    /// Send a text frame
    pub async fn send(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::text(text.to_string())).await?;
        Ok(())
    }

    pub async fn send_json(&mut self, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
        self.send(&value.to_string()).await
    }

    pub async fn send_binary(&mut self, bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::binary(bytes)).await?;
        Ok(())
    }

    /// Close the connection
    pub async fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.close(None).await?;
        Ok(())
    }

    /// Next text frame parsed as JSON, skipping control frames.
    pub async fn recv_json(&mut self) -> Result<Value, Box<dyn std::error::Error>> {
        loop {
            match self.recv_timeout(RECV_TIMEOUT).await? {
                Some(Message::Text(text)) => return Ok(serde_json::from_str(&text)?),
                Some(Message::Ping(_)) | Some(Message::Pong(_)) => continue,
                Some(other) => return Err(format!("unexpected frame: {other:?}").into()),
                None => return Err("connection closed".into()),
            }
        }
    }

    /// Next `game_state` message's `game` payload.
    pub async fn recv_state(&mut self) -> Result<Value, Box<dyn std::error::Error>> {
        let msg = self.recv_json().await?;
        if msg["type"] != "game_state" {
            return Err(format!("expected game_state, got {msg}").into());
        }
        Ok(msg["game"].clone())
    }

    /// Next `error` message.
    pub async fn recv_error(&mut self) -> Result<Value, Box<dyn std::error::Error>> {
        let msg = self.recv_json().await?;
        if msg["type"] != "error" {
            return Err(format!("expected error, got {msg}").into());
        }
        Ok(msg)
    }

    /// Sends `join_game` and returns the resulting state.
    pub async fn join(
        &mut self,
        game_id: Uuid,
        player_id: &str,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        self.send_json(&intent("join_game", game_id, player_id)).await?;
        self.recv_state().await
    }
}

/// Intent without extra payload.
pub fn intent(kind: &str, game_id: Uuid, player_id: &str) -> Value {
    json!({ "type": kind, "gameId": game_id, "playerId": player_id })
}

pub fn make_move(
    game_id: Uuid,
    player_id: &str,
    row: i32,
    col: i32,
    tile_type: &str,
    rotation: u16,
) -> Value {
    json!({
        "type": "make_move",
        "gameId": game_id,
        "playerId": player_id,
        "move": { "row": row, "col": col, "tileType": tile_type, "rotation": rotation }
    })
}
