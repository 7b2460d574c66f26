//! Domain-level error type used by the game engine and the session registry.
//!
//! This error type is HTTP- and transport-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert through
//! `From<DomainError> for AppError`; the WebSocket layer turns it into an
//! `error` message for the offending client only.

use thiserror::Error;

use crate::domain::board::PlacementViolation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Unknown session id
    #[error("Game not found: {0}")]
    NotFound(String),
    /// Two distinct players already joined
    #[error("Game is full")]
    GameFull,
    /// Caller is not the current player (or not a member at all)
    #[error("Not your turn")]
    NotYourTurn,
    #[error("Invalid tile placement: {0}")]
    InvalidPlacement(PlacementViolation),
    /// An operation needed a tile that does not exist
    #[error("No tiles left in the deck")]
    DeckEmpty,
    #[error("No jokers left")]
    NoJokersLeft,
    #[error("No tile to act on")]
    NoCurrentTile,
    /// Operation not allowed in the session's current status
    #[error("Game is not active")]
    GameNotActive,
    #[error("Invalid deck: {0}")]
    InvalidDeck(String),
    /// Malformed tile code or rotation
    #[error("{0}")]
    ParseTile(String),
    #[error("Connection lost")]
    ConnectionLost,
}

impl DomainError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(id.to_string())
    }

    pub fn invalid_deck(detail: impl Into<String>) -> Self {
        Self::InvalidDeck(detail.into())
    }
}

impl From<PlacementViolation> for DomainError {
    fn from(v: PlacementViolation) -> Self {
        Self::InvalidPlacement(v)
    }
}
