//! Board state: fixed-size grid, border ring, placement legality and scoring.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::tiles::{
    edges_compatible, rotated_edge, rotation_facing, Direction, Rotation, Terrain, TileType,
};

pub const BOARD_SIZE: usize = 10;

/// Grid coordinate. Signed so that off-board requests stay representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub const fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.offset();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    fn index(self) -> Option<(usize, usize)> {
        let row = usize::try_from(self.row).ok()?;
        let col = usize::try_from(self.col).ok()?;
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some((row, col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Who put a tile on the board. Border tiles serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Border,
    Player(usize),
}

impl Serialize for Owner {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Owner::Border => serializer.serialize_none(),
            Owner::Player(idx) => serializer.serialize_u64(*idx as u64),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacedTile {
    #[serde(rename = "type")]
    pub tile_type: TileType,
    pub rotation: Rotation,
    pub owner: Owner,
}

impl PlacedTile {
    pub fn edge(&self, side: Direction) -> Terrain {
        rotated_edge(self.tile_type, self.rotation, side)
    }
}

/// Reason a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementViolation {
    OutOfBounds,
    BorderCell,
    Occupied,
    /// The edge facing the neighbour in this direction does not match.
    IncompatibleEdge(Direction),
    /// No orthogonal neighbour holds a tile.
    Isolated,
    /// Submitted tile type is not the tile the player holds.
    TileMismatch,
}

impl fmt::Display for PlacementViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementViolation::OutOfBounds => f.write_str("position is off the board"),
            PlacementViolation::BorderCell => f.write_str("border cells are fixed"),
            PlacementViolation::Occupied => f.write_str("cell is occupied"),
            PlacementViolation::IncompatibleEdge(dir) => {
                write!(f, "edge does not match the {dir} neighbour")
            }
            PlacementViolation::Isolated => f.write_str("tile must touch an existing tile"),
            PlacementViolation::TileMismatch => f.write_str("tile is not the current tile"),
        }
    }
}

const CORNER_TILES: [(i32, i32, &str, Rotation); 4] = [
    (0, 0, "CRRF", Rotation::Deg0),
    (0, 9, "CFRF", Rotation::Deg270),
    (9, 0, "FRRF", Rotation::Deg90),
    (9, 9, "FFCR", Rotation::Deg180),
];

const BORDER_ROAD: &str = "RRFF";

const BORDER_ROAD_CELLS: [(i32, i32, Direction); 8] = [
    (0, 2, Direction::Bottom),
    (0, 7, Direction::Bottom),
    (2, 0, Direction::Right),
    (7, 0, Direction::Right),
    (9, 2, Direction::Top),
    (9, 7, Direction::Top),
    (2, 9, Direction::Left),
    (7, 9, Direction::Left),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<PlacedTile>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.cells.serialize(serializer)
    }
}

impl Board {
    /// Grid with every cell empty, border included.
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Grid with the fixed starting ring: a city tile in each corner and
    /// two roads on every side, each road turned to face the interior.
    pub fn with_border() -> Self {
        let mut board = Self::empty();
        for (row, col, code, rotation) in CORNER_TILES {
            if let Ok(tile_type) = code.parse() {
                board.set_border(Position::new(row, col), tile_type, rotation);
            }
        }
        if let Ok(road) = BORDER_ROAD.parse::<TileType>() {
            for (row, col, inward) in BORDER_ROAD_CELLS {
                let rotation = rotation_facing(road, Terrain::Road, inward).unwrap_or_default();
                board.set_border(Position::new(row, col), road, rotation);
            }
        }
        board
    }

    fn set_border(&mut self, pos: Position, tile_type: TileType, rotation: Rotation) {
        if let Some((r, c)) = pos.index() {
            self.cells[r][c] = Some(PlacedTile {
                tile_type,
                rotation,
                owner: Owner::Border,
            });
        }
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.index().is_some()
    }

    /// Outermost ring of the grid.
    pub fn is_border(&self, pos: Position) -> bool {
        let last = BOARD_SIZE as i32 - 1;
        self.in_bounds(pos) && (pos.row == 0 || pos.col == 0 || pos.row == last || pos.col == last)
    }

    pub fn get(&self, pos: Position) -> Option<&PlacedTile> {
        pos.index().and_then(|(r, c)| self.cells[r][c].as_ref())
    }

    /// False for off-board positions.
    pub fn is_empty_cell(&self, pos: Position) -> bool {
        pos.index().is_some_and(|(r, c)| self.cells[r][c].is_none())
    }

    /// In-bounds orthogonal neighbours, occupied or not.
    pub fn neighbors(&self, pos: Position) -> Vec<(Direction, Position)> {
        Direction::ALL
            .into_iter()
            .map(|d| (d, pos.step(d)))
            .filter(|(_, p)| self.in_bounds(*p))
            .collect()
    }

    pub fn placement_error(
        &self,
        pos: Position,
        tile_type: TileType,
        rotation: Rotation,
    ) -> Option<PlacementViolation> {
        if !self.in_bounds(pos) {
            return Some(PlacementViolation::OutOfBounds);
        }
        if self.is_border(pos) {
            return Some(PlacementViolation::BorderCell);
        }
        if !self.is_empty_cell(pos) {
            return Some(PlacementViolation::Occupied);
        }

        let mut touches = false;
        for dir in Direction::ALL {
            let Some(neighbor) = self.get(pos.step(dir)) else {
                continue;
            };
            touches = true;
            let mine = rotated_edge(tile_type, rotation, dir);
            if !edges_compatible(mine, neighbor.edge(dir.opposite())) {
                return Some(PlacementViolation::IncompatibleEdge(dir));
            }
        }

        if touches {
            None
        } else {
            Some(PlacementViolation::Isolated)
        }
    }

    pub fn is_valid_placement(&self, pos: Position, tile_type: TileType, rotation: Rotation) -> bool {
        self.placement_error(pos, tile_type, rotation).is_none()
    }

    /// Puts a tile on the board after checking legality. Scoring is the
    /// caller's job.
    pub fn place(
        &mut self,
        pos: Position,
        tile_type: TileType,
        rotation: Rotation,
        owner: Owner,
    ) -> Result<(), PlacementViolation> {
        if let Some(v) = self.placement_error(pos, tile_type, rotation) {
            return Err(v);
        }
        let (r, c) = pos.index().ok_or(PlacementViolation::OutOfBounds)?;
        self.cells[r][c] = Some(PlacedTile {
            tile_type,
            rotation,
            owner,
        });
        Ok(())
    }

    /// One point for every player-placed tile; nothing for border or empty.
    pub fn compute_score(&self, pos: Position) -> u32 {
        match self.get(pos) {
            Some(PlacedTile {
                owner: Owner::Player(_),
                ..
            }) => 1,
            _ => 0,
        }
    }

    /// Every interior cell and rotation where `tile_type` could go.
    pub fn valid_placements(&self, tile_type: TileType) -> Vec<(Position, Rotation)> {
        let mut out = Vec::new();
        for row in 1..BOARD_SIZE as i32 - 1 {
            for col in 1..BOARD_SIZE as i32 - 1 {
                let pos = Position::new(row, col);
                if !self.is_empty_cell(pos) {
                    continue;
                }
                for rotation in Rotation::ALL {
                    if self.is_valid_placement(pos, tile_type, rotation) {
                        out.push((pos, rotation));
                    }
                }
            }
        }
        out
    }

    pub fn has_valid_placement(&self, tile_type: TileType) -> bool {
        !self.valid_placements(tile_type).is_empty()
    }

    /// Number of tiles placed by players.
    pub fn placed_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .filter(|t| matches!(t.owner, Owner::Player(_)))
            .count()
    }

    pub fn is_interior_empty(&self) -> bool {
        self.placed_count() == 0
    }
}
