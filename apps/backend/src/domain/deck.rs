//! Tile deck: configuration, shuffle, draw and requeue.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::tiles::TileType;
use crate::errors::domain::DomainError;

/// Tile type → number of copies.
pub type DeckConfig = BTreeMap<TileType, u32>;

/// Upper bound for a single game's deck; the board has 64 interior cells.
pub const MAX_DECK_SIZE: u64 = 1024;

const DEFAULT_DECK: [(&str, u32); 10] = [
    ("CFRF", 6),
    ("CRRF", 6),
    ("FRRF", 8),
    ("RRFF", 8),
    ("FRFR", 8),
    ("CFFF", 6),
    ("CFCF", 4),
    ("CCFF", 4),
    ("FFCR", 4),
    ("CRFR", 4),
];

/// Built-in deck used when neither the request nor the server config
/// supplies one.
pub fn default_config() -> DeckConfig {
    DEFAULT_DECK
        .iter()
        .filter_map(|(code, count)| code.parse().ok().map(|t| (t, *count)))
        .collect()
}

/// Total number of tiles a configuration expands to.
///
/// Rejects configurations with no tiles at all or more than
/// [`MAX_DECK_SIZE`].
pub fn validate_config(config: &DeckConfig) -> Result<usize, DomainError> {
    let total: u64 = config.values().map(|&c| u64::from(c)).sum();
    if total == 0 {
        return Err(DomainError::invalid_deck("deck must contain at least one tile"));
    }
    if total > MAX_DECK_SIZE {
        return Err(DomainError::invalid_deck(format!(
            "deck has {total} tiles, maximum is {MAX_DECK_SIZE}"
        )));
    }
    usize::try_from(total).map_err(|_| DomainError::invalid_deck("deck too large"))
}

/// Ordered draw pile; the top of the deck is the end of the vector.
pub struct Deck {
    tiles: Vec<TileType>,
    total: usize,
    rng: StdRng,
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deck")
            .field("remaining", &self.tiles.len())
            .field("total", &self.total)
            .finish()
    }
}

impl Deck {
    /// Expands and shuffles `config` using an OS-seeded generator.
    pub fn build(config: &DeckConfig) -> Result<Self, DomainError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(config: &DeckConfig, seed: u64) -> Result<Self, DomainError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: &DeckConfig, mut rng: StdRng) -> Result<Self, DomainError> {
        let total = validate_config(config)?;
        let mut tiles = Vec::with_capacity(total);
        for (&tile, &count) in config {
            tiles.extend(std::iter::repeat(tile).take(count as usize));
        }
        tiles.shuffle(&mut rng);
        Ok(Self { tiles, total, rng })
    }

    /// Removes the top tile; `None` once the deck is exhausted.
    pub fn draw(&mut self) -> Option<TileType> {
        self.tiles.pop()
    }

    /// Puts `tile` back and reshuffles everything that remains.
    pub fn requeue_and_reshuffle(&mut self, tile: TileType) {
        self.tiles.push(tile);
        self.tiles.shuffle(&mut self.rng);
    }

    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }

    /// Number of tiles the deck was built with.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Distinct tile types still in the pile.
    pub fn tile_types(&self) -> BTreeSet<TileType> {
        self.tiles.iter().copied().collect()
    }

    #[cfg(test)]
    pub(crate) fn tiles(&self) -> &[TileType] {
        &self.tiles
    }
}
