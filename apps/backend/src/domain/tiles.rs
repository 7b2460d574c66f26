//! Tile edge model: terrain symbols, tile types, rotations and directions.
//!
//! A tile type lists its four edges clockwise starting at the top. Rotation
//! is stored beside the type and applied on demand; the type itself never
//! changes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Terrain {
    City,
    Field,
    Road,
}

impl Terrain {
    pub const ALL: [Terrain; 3] = [Terrain::City, Terrain::Field, Terrain::Road];

    pub const fn symbol(self) -> char {
        match self {
            Terrain::City => 'C',
            Terrain::Field => 'F',
            Terrain::Road => 'R',
        }
    }

    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            'C' => Some(Terrain::City),
            'F' => Some(Terrain::Field),
            'R' => Some(Terrain::Road),
            _ => None,
        }
    }
}

/// Side of a tile or direction towards a neighbouring cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// Clockwise order, matching the edge order of [`TileType`].
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// `(row, col)` delta of the neighbouring cell.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Top => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Bottom => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Direction::Top => 0,
            Direction::Right => 1,
            Direction::Bottom => 2,
            Direction::Left => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Top => "top",
            Direction::Right => "right",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
        };
        f.write_str(s)
    }
}

/// Four edge terrains in order top, right, bottom, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileType([Terrain; 4]);

impl TileType {
    pub const fn new(edges: [Terrain; 4]) -> Self {
        Self(edges)
    }

    pub const fn edges(self) -> [Terrain; 4] {
        self.0
    }

    pub const fn edge(self, side: Direction) -> Terrain {
        self.0[side.index()]
    }

    pub fn code(self) -> String {
        self.0.iter().map(|t| t.symbol()).collect()
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in self.0 {
            write!(f, "{}", t.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for TileType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || DomainError::ParseTile(format!("Parse tile: {s}"));
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 {
            return Err(parse_err());
        }
        let mut edges = [Terrain::Field; 4];
        for (slot, c) in edges.iter_mut().zip(chars) {
            *slot = Terrain::from_symbol(c).ok_or_else(parse_err)?;
        }
        Ok(TileType(edges))
    }
}

// Compact 4-character form like "CFRF"; also valid as a JSON map key.
impl Serialize for TileType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.code())
    }
}

impl<'de> Deserialize<'de> for TileType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("Invalid tile type: {s}")))
    }
}

/// Clockwise rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Number of clockwise quarter turns.
    pub const fn steps(self) -> usize {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    pub const fn rotate_cw(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Accepts any multiple of 90, normalised into `0..360`.
    pub fn from_degrees(degrees: i64) -> Result<Self, DomainError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(DomainError::ParseTile(format!(
                "Rotation must be a multiple of 90 degrees, got {degrees}"
            ))),
        }
    }
}

impl Serialize for Rotation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(self.degrees())
    }
}

impl<'de> Deserialize<'de> for Rotation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let degrees = i64::deserialize(deserializer)?;
        Rotation::from_degrees(degrees).map_err(serde::de::Error::custom)
    }
}

/// Edges of `tile` after applying `rotation`, in order top, right, bottom, left.
///
/// One clockwise step moves every edge one side clockwise, so the new top is
/// the old left.
pub fn rotated_edges(tile: TileType, rotation: Rotation) -> [Terrain; 4] {
    let base = tile.edges();
    let steps = rotation.steps();
    std::array::from_fn(|i| base[(i + 4 - steps) % 4])
}

/// Terrain showing on `side` of a rotated tile.
pub fn rotated_edge(tile: TileType, rotation: Rotation, side: Direction) -> Terrain {
    rotated_edges(tile, rotation)[side.index()]
}

/// Two touching edges match only on identical terrain.
pub fn edges_compatible(a: Terrain, b: Terrain) -> bool {
    a == b
}

/// Smallest rotation that shows `terrain` on `side`, if any rotation does.
pub fn rotation_facing(tile: TileType, terrain: Terrain, side: Direction) -> Option<Rotation> {
    Rotation::ALL
        .into_iter()
        .find(|&r| rotated_edge(tile, r, side) == terrain)
}
