//! Per-match state machine: joining, turns, placement, skips and jokers.
//!
//! Every operation validates before it mutates, so a failing call leaves
//! the session exactly as it was.

use serde::Serialize;

use super::board::{Board, Owner, PlacementViolation, Position};
use super::deck::{Deck, DeckConfig};
use super::snapshot::GameSnapshot;
use super::tiles::{Rotation, TileType};
use super::{PlayerId, SessionId};
use crate::errors::domain::DomainError;

pub const MAX_PLAYERS: usize = 2;
pub const STARTING_JOKERS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Waiting,
    Active,
    Disconnected,
    Finished,
}

impl GameStatus {
    /// Turn-taking operations are accepted in these states.
    pub const fn accepts_turns(self) -> bool {
        matches!(self, GameStatus::Active | GameStatus::Disconnected)
    }
}

/// Tile held by the current player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrentTile {
    #[serde(rename = "type")]
    pub tile_type: TileType,
    pub rotation: Rotation,
}

impl CurrentTile {
    pub const fn fresh(tile_type: TileType) -> Self {
        Self {
            tile_type,
            rotation: Rotation::Deg0,
        }
    }
}

/// Result of a successful join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined(usize),
    Reconnected(usize),
}

impl JoinOutcome {
    pub const fn index(self) -> usize {
        match self {
            JoinOutcome::Joined(i) | JoinOutcome::Reconnected(i) => i,
        }
    }
}

#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    players: Vec<PlayerId>,
    connected: Vec<bool>,
    current_player: Option<usize>,
    board: Board,
    deck: Deck,
    current_tile: Option<CurrentTile>,
    scores: [u32; MAX_PLAYERS],
    jokers: [u8; MAX_PLAYERS],
    status: GameStatus,
}

impl GameSession {
    /// New waiting session with the border laid out and the deck shuffled.
    pub fn create(id: SessionId, deck_config: &DeckConfig) -> Result<Self, DomainError> {
        Ok(Self::with_deck(id, Deck::build(deck_config)?))
    }

    pub fn with_deck(id: SessionId, deck: Deck) -> Self {
        Self {
            id,
            players: Vec::with_capacity(MAX_PLAYERS),
            connected: Vec::with_capacity(MAX_PLAYERS),
            current_player: None,
            board: Board::with_border(),
            deck,
            current_tile: None,
            scores: [0; MAX_PLAYERS],
            jokers: [STARTING_JOKERS; MAX_PLAYERS],
            status: GameStatus::Waiting,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn player_index(&self, player_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p == player_id)
    }

    pub fn is_connected(&self, idx: usize) -> bool {
        self.connected.get(idx).copied().unwrap_or(false)
    }

    pub fn current_player(&self) -> Option<usize> {
        self.current_player
    }

    pub fn current_tile(&self) -> Option<CurrentTile> {
        self.current_tile
    }

    pub fn scores(&self) -> [u32; MAX_PLAYERS] {
        self.scores
    }

    pub fn jokers(&self) -> [u8; MAX_PLAYERS] {
        self.jokers
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Adds a player, or reattaches one that is already a member.
    ///
    /// The second distinct player starts the game: player 0 moves first with
    /// a freshly drawn tile.
    pub fn join(&mut self, player_id: &str) -> Result<JoinOutcome, DomainError> {
        if let Some(idx) = self.player_index(player_id) {
            self.connected[idx] = true;
            if self.status == GameStatus::Disconnected && self.connected.iter().all(|c| *c) {
                self.status = GameStatus::Active;
            }
            return Ok(JoinOutcome::Reconnected(idx));
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(DomainError::GameFull);
        }
        if self.status == GameStatus::Finished {
            return Err(DomainError::GameNotActive);
        }

        self.players.push(player_id.to_owned());
        self.connected.push(true);
        let idx = self.players.len() - 1;

        if self.players.len() == MAX_PLAYERS {
            self.start();
        }
        Ok(JoinOutcome::Joined(idx))
    }

    fn start(&mut self) {
        self.current_player = Some(0);
        self.current_tile = self.deck.draw().map(CurrentTile::fresh);
        if self.connected.iter().all(|c| *c) {
            self.status = GameStatus::Active;
        } else {
            self.status = GameStatus::Disconnected;
            if !self.is_connected(0) {
                self.current_player = Some(1);
            }
        }
        self.evaluate_termination();
    }

    /// Index of `player_id` if it holds the turn in a running game.
    fn require_turn(&self, player_id: &str) -> Result<usize, DomainError> {
        if !self.status.accepts_turns() {
            return Err(DomainError::GameNotActive);
        }
        match (self.player_index(player_id), self.current_player) {
            (Some(idx), Some(cur)) if idx == cur => Ok(idx),
            _ => Err(DomainError::NotYourTurn),
        }
    }

    /// Places the held tile and returns the points it earned.
    pub fn make_move(
        &mut self,
        player_id: &str,
        pos: Position,
        tile_type: TileType,
        rotation: Rotation,
    ) -> Result<u32, DomainError> {
        let idx = self.require_turn(player_id)?;
        let current = self.current_tile.ok_or(DomainError::NoCurrentTile)?;
        if current.tile_type != tile_type {
            return Err(PlacementViolation::TileMismatch.into());
        }

        self.board
            .place(pos, tile_type, rotation, Owner::Player(idx))?;
        let points = self.board.compute_score(pos);
        self.scores[idx] += points;

        self.current_tile = self.deck.draw().map(CurrentTile::fresh);
        self.advance_turn();
        self.evaluate_termination();
        Ok(points)
    }

    /// Turns the held tile a quarter clockwise.
    pub fn rotate_current_tile(&mut self, player_id: &str) -> Result<Rotation, DomainError> {
        self.require_turn(player_id)?;
        let tile = self
            .current_tile
            .as_mut()
            .ok_or(DomainError::NoCurrentTile)?;
        tile.rotation = tile.rotation.rotate_cw();
        Ok(tile.rotation)
    }

    /// Returns the held tile to the deck, reshuffles, draws a replacement
    /// and passes the turn. Scores are untouched.
    pub fn skip_turn(&mut self, player_id: &str) -> Result<(), DomainError> {
        self.require_turn(player_id)?;
        let held = self.current_tile.ok_or(DomainError::NoCurrentTile)?;

        self.deck.requeue_and_reshuffle(held.tile_type);
        self.current_tile = self.deck.draw().map(CurrentTile::fresh);
        self.advance_turn();
        self.evaluate_termination();
        Ok(())
    }

    /// Spends one joker; returns how many the player has left.
    pub fn use_joker(&mut self, player_id: &str) -> Result<u8, DomainError> {
        let idx = self.require_turn(player_id)?;
        let left = self.jokers[idx]
            .checked_sub(1)
            .ok_or(DomainError::NoJokersLeft)?;
        self.jokers[idx] = left;
        Ok(left)
    }

    /// Marks a player's connection as gone. Returns false for non-members.
    ///
    /// A running game becomes `disconnected`; if the leaver held the turn it
    /// passes to the other player.
    pub fn disconnect(&mut self, player_id: &str) -> bool {
        let Some(idx) = self.player_index(player_id) else {
            return false;
        };
        self.connected[idx] = false;
        if self.status.accepts_turns() {
            self.status = GameStatus::Disconnected;
            if self.current_player == Some(idx) {
                self.current_player = Some(Self::other(idx));
            }
        }
        true
    }

    pub fn finish(&mut self) {
        self.status = GameStatus::Finished;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::of(self)
    }

    const fn other(idx: usize) -> usize {
        (idx + 1) % MAX_PLAYERS
    }

    /// Alternates strictly while both players are connected; a connected
    /// player keeps the turn while the opponent is away.
    fn advance_turn(&mut self) {
        let Some(cur) = self.current_player else {
            return;
        };
        let next = Self::other(cur);
        if self.is_connected(next) || !self.is_connected(cur) {
            self.current_player = Some(next);
        }
    }

    /// Ends the game when no tile is held, or when neither the held tile nor
    /// any tile left in the deck fits anywhere in any rotation. A full board
    /// with tiles still in the deck therefore finishes too.
    fn evaluate_termination(&mut self) {
        if self.status == GameStatus::Finished {
            return;
        }
        let done = match self.current_tile {
            None => true,
            Some(t) => {
                !self.board.has_valid_placement(t.tile_type)
                    && !self
                        .deck
                        .tile_types()
                        .into_iter()
                        .any(|tile| self.board.has_valid_placement(tile))
            }
        };
        if done {
            self.status = GameStatus::Finished;
        }
    }
}
