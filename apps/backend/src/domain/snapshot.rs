//! Public snapshot API for observing game state without exposing internals.

use serde::Serialize;

use super::board::Board;
use super::session::{CurrentTile, GameSession, GameStatus, MAX_PLAYERS};
use super::SessionId;

/// Everything a client needs to render one game.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub id: SessionId,
    pub board: Board,
    pub current_player: Option<usize>,
    pub current_tile: Option<CurrentTile>,
    pub scores: [u32; MAX_PLAYERS],
    pub jokers: [u8; MAX_PLAYERS],
    pub status: GameStatus,
    /// Number of players that have joined.
    pub players: usize,
    pub tiles_remaining: usize,
}

impl GameSnapshot {
    pub fn of(session: &GameSession) -> Self {
        Self {
            id: session.id(),
            board: session.board().clone(),
            current_player: session.current_player(),
            current_tile: session.current_tile(),
            scores: session.scores(),
            jokers: session.jokers(),
            status: session.status(),
            players: session.players().len(),
            tiles_remaining: session.deck().remaining(),
        }
    }
}
