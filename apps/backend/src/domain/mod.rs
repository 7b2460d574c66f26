//! Domain layer: pure game logic types and helpers.

pub mod board;
pub mod deck;
pub mod session;
pub mod snapshot;
pub mod tiles;

#[cfg(test)]
mod tests_props_board;
#[cfg(test)]
mod tests_props_session;

/// Opaque identifier of one game session.
pub type SessionId = uuid::Uuid;
/// Client-chosen player identifier.
pub type PlayerId = String;

// Re-exports for ergonomics
pub use board::{Board, Owner, PlacedTile, PlacementViolation, Position, BOARD_SIZE};
pub use deck::{default_config, validate_config, Deck, DeckConfig};
pub use session::{CurrentTile, GameSession, GameStatus, JoinOutcome};
pub use snapshot::GameSnapshot;
pub use tiles::{edges_compatible, rotated_edges, Direction, Rotation, Terrain, TileType};
