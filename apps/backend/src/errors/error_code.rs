//! Error codes for the tile game API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. Every code
//! is SCREAMING_SNAKE_CASE and maps 1:1 to the string that appears in HTTP
//! problem responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Malformed request body or path
    BadRequest,
    /// Game id is not a UUID
    InvalidGameId,
    /// Deck configuration rejected
    InvalidDeck,
    /// Tile code or rotation could not be parsed
    InvalidTile,

    // Resource Not Found
    GameNotFound,

    // Gameplay Conflicts
    GameFull,
    NotYourTurn,
    InvalidPlacement,
    DeckEmpty,
    NoJokersLeft,
    NoCurrentTile,
    GameNotActive,

    // System Errors
    ConnectionLost,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidDeck => "INVALID_DECK",
            Self::InvalidTile => "INVALID_TILE",

            Self::GameNotFound => "GAME_NOT_FOUND",

            Self::GameFull => "GAME_FULL",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::InvalidPlacement => "INVALID_PLACEMENT",
            Self::DeckEmpty => "DECK_EMPTY",
            Self::NoJokersLeft => "NO_JOKERS_LEFT",
            Self::NoCurrentTile => "NO_CURRENT_TILE",
            Self::GameNotActive => "GAME_NOT_ACTIVE",

            Self::ConnectionLost => "CONNECTION_LOST",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
