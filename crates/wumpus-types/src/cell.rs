//! Grid coordinates, bounds, and compass directions.
//!
//! Coordinates are 1-based: the cave entrance is (1,1) in the south-west
//! corner, North increases `y` and East increases `x`. Cells order by
//! `(x, y)`, so every map keyed by [`Cell`] iterates deterministically.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four compass directions the agent can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards increasing `y`.
    North,
    /// Towards increasing `x`.
    East,
    /// Towards decreasing `y`.
    South,
    /// Towards decreasing `x`.
    West,
}

impl Direction {
    /// All directions in tie-break order: North, East, South, West.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The direction after a 90-degree counter-clockwise turn.
    pub const fn left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// The direction after a 90-degree clockwise turn.
    pub const fn right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// The opposite direction.
    pub const fn reverse(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::North => write!(f, "North"),
            Self::East => write!(f, "East"),
            Self::South => write!(f, "South"),
            Self::West => write!(f, "West"),
        }
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A room in the cave, identified by its coordinates.
///
/// Serialized as an `[x, y]` pair so layouts read naturally in YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Cell {
    /// Column, starting at 1 on the west wall.
    pub x: u32,
    /// Row, starting at 1 on the south wall.
    pub y: u32,
}

impl Cell {
    /// The entrance and exit of the cave.
    pub const START: Self = Self { x: 1, y: 1 };

    /// Create a cell from its coordinates.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in `direction`, ignoring grid bounds.
    ///
    /// Returns `None` only when the coordinate would leave the `u32` range;
    /// use [`GridBounds::neighbor`] for bounded movement.
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (x, y) = match direction {
            Direction::North => (Some(self.x), self.y.checked_add(1)),
            Direction::East => (self.x.checked_add(1), Some(self.y)),
            Direction::South => (Some(self.x), self.y.checked_sub(1)),
            Direction::West => (self.x.checked_sub(1), Some(self.y)),
        };
        match (x, y) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    /// The direction from `self` to an orthogonally adjacent `other`.
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.step(d) == Some(other))
    }

    /// The direction in which `other` lies on the same row or column.
    ///
    /// Returns `None` for the same cell or for cells off both lines.
    pub const fn line_direction(self, other: Self) -> Option<Direction> {
        if self.x == other.x {
            if other.y > self.y {
                return Some(Direction::North);
            }
            if other.y < self.y {
                return Some(Direction::South);
            }
            return None;
        }
        if self.y == other.y {
            if other.x > self.x {
                return Some(Direction::East);
            }
            return Some(Direction::West);
        }
        None
    }
}

impl From<(u32, u32)> for Cell {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl From<Cell> for (u32, u32) {
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// GridBounds
// ---------------------------------------------------------------------------

/// The dimensions of the cave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBounds {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl GridBounds {
    /// Create bounds of the given size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether `cell` lies inside the cave.
    pub const fn contains(self, cell: Cell) -> bool {
        cell.x >= 1 && cell.x <= self.width && cell.y >= 1 && cell.y <= self.height
    }

    /// The in-bounds neighbor of `cell` in `direction`.
    pub fn neighbor(self, cell: Cell, direction: Direction) -> Option<Cell> {
        cell.step(direction).filter(|&c| self.contains(c))
    }

    /// All in-bounds neighbors of `cell`, in North, East, South, West order.
    pub fn neighbors(self, cell: Cell) -> Vec<Cell> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.neighbor(cell, d))
            .collect()
    }

    /// Every cell strictly ahead of `cell` in `direction`, nearest first.
    pub fn ray(self, cell: Cell, direction: Direction) -> Vec<Cell> {
        let mut cells = Vec::new();
        let mut current = cell;
        while let Some(next) = self.neighbor(current, direction) {
            cells.push(next);
            current = next;
        }
        cells
    }

    /// Every cell of the cave, ordered by `(x, y)`.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (1..=self.width).flat_map(move |x| (1..=self.height).map(move |y| Cell::new(x, y)))
    }

    /// Total number of cells.
    pub fn cell_count(self) -> usize {
        let count = u64::from(self.width).saturating_mul(u64::from(self.height));
        usize::try_from(count).unwrap_or(usize::MAX)
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::new(4, 4)
    }
}
