// Grid primitives shared by the search core and the maze game
//
// Positions are plain integer coordinates with x growing eastward and y growing
// southward, matching the row/column order of the ASCII maze sketches.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of an agent within a state, counted from zero
pub type AgentId = usize;

/// 2D coordinate on the grid
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Manhattan distance between two cells
    pub fn manhattan(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four unit displacements available to every agent.
///
/// The declaration order is the enumeration order used everywhere legal actions are
/// listed, so it decides which of several equally short paths a search returns.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    West,
    South,
    East,
}

impl Direction {
    /// Returns all directions in enumeration order
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::West,
            Direction::South,
            Direction::East,
        ]
    }

    /// Converts direction to its lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::West => "west",
            Direction::South => "south",
            Direction::East => "east",
        }
    }

    /// Heading in degrees, counter-clockwise from east; east is reported as 360 so that
    /// no direction carries a zero code
    pub fn degrees(&self) -> u16 {
        match self {
            Direction::North => 90,
            Direction::West => 180,
            Direction::South => 270,
            Direction::East => 360,
        }
    }

    /// Unit displacement `(dx, dy)`
    pub fn basis(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
        }
    }

    /// Calculates the destination when moving in this direction
    pub fn apply(&self, position: &Position) -> Position {
        let (dx, dy) = self.basis();
        Position {
            x: position.x + dx,
            y: position.y + dy,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
