use serde::{Deserialize, Serialize};

use crate::domain::{GameSnapshot, PlayerId, Position, Rotation, SessionId, TileType};

/// Intents sent by a client. Every intent names the game and the player.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    #[serde(rename_all = "camelCase")]
    JoinGame {
        game_id: SessionId,
        player_id: PlayerId,
    },
    #[serde(rename_all = "camelCase")]
    MakeMove {
        game_id: SessionId,
        player_id: PlayerId,
        #[serde(rename = "move")]
        placement: MovePayload,
    },
    #[serde(rename_all = "camelCase")]
    RotateTile {
        game_id: SessionId,
        player_id: PlayerId,
    },
    #[serde(rename_all = "camelCase")]
    SkipTurn {
        game_id: SessionId,
        player_id: PlayerId,
    },
    #[serde(rename_all = "camelCase")]
    UseJoker {
        game_id: SessionId,
        player_id: PlayerId,
    },
}

impl ClientMsg {
    pub fn game_id(&self) -> SessionId {
        match self {
            ClientMsg::JoinGame { game_id, .. }
            | ClientMsg::MakeMove { game_id, .. }
            | ClientMsg::RotateTile { game_id, .. }
            | ClientMsg::SkipTurn { game_id, .. }
            | ClientMsg::UseJoker { game_id, .. } => *game_id,
        }
    }

    pub fn player_id(&self) -> &str {
        match self {
            ClientMsg::JoinGame { player_id, .. }
            | ClientMsg::MakeMove { player_id, .. }
            | ClientMsg::RotateTile { player_id, .. }
            | ClientMsg::SkipTurn { player_id, .. }
            | ClientMsg::UseJoker { player_id, .. } => player_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ClientMsg::JoinGame { .. } => "join_game",
            ClientMsg::MakeMove { .. } => "make_move",
            ClientMsg::RotateTile { .. } => "rotate_tile",
            ClientMsg::SkipTurn { .. } => "skip_turn",
            ClientMsg::UseJoker { .. } => "use_joker",
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePayload {
    pub row: i32,
    pub col: i32,
    pub tile_type: TileType,
    #[serde(default)]
    pub rotation: Rotation,
}

impl MovePayload {
    pub const fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    GameState { game: GameSnapshot },
    Error { code: &'static str, message: String },
}
