// Static maze geometry and the initial layout of an episode
//
// A maze only answers "can an agent stand here?". Everything that changes during play
// (agents, food, pellets) lives in GameState; the layout just seeds it.

use std::collections::HashSet;

use crate::error::MazeError;
use crate::types::Position;

/// Built-in maze used by the demo binary.
///
/// Glyphs: `#` wall, `.` food, `o` pellet, space for an empty passage, `P` the mover's
/// start and `G` an adversary start (numbered in reading order after the mover).
pub const CLASSIC_LAYOUT: &str = "\
###################
#o.......#.......o#
#.##.###.#.###.##.#
#.................#
#.##.#.#####.#.##.#
#....#...G...#....#
####.### # ###.####
#........P........#
#.##.###.#.###.##.#
#o.......G.......o#
###################";

/// Rectangular grid of passable and walled cells. The outer border is always walled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: i32,
    height: i32,
    walls: HashSet<Position>,
}

impl Maze {
    /// Creates a maze of the given size; border cells are added to `walls`
    pub fn new(width: i32, height: i32, walls: impl IntoIterator<Item = Position>) -> Self {
        let mut walls: HashSet<Position> = walls.into_iter().collect();
        for x in 0..width {
            walls.insert(Position::new(x, 0));
            walls.insert(Position::new(x, height - 1));
        }
        for y in 0..height {
            walls.insert(Position::new(0, y));
            walls.insert(Position::new(width - 1, y));
        }
        Maze {
            width,
            height,
            walls,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// True when the cell is inside the grid and not a wall
    pub fn is_movable(&self, place: Position) -> bool {
        place.x >= 0
            && place.y >= 0
            && place.x < self.width
            && place.y < self.height
            && !self.walls.contains(&place)
    }
}

/// A maze plus the initial placement of agents, food and pellets
#[derive(Debug, Clone)]
pub struct MazeLayout {
    pub maze: Maze,
    /// Start cell per agent; index 0 is the mover
    pub starts: Vec<Position>,
    pub food: Vec<Position>,
    pub pellets: Vec<Position>,
}

impl MazeLayout {
    /// Parses an ASCII sketch (see [`CLASSIC_LAYOUT`] for the glyph set).
    ///
    /// Blank lines are ignored. Rows must share one width; exactly one `P` is required.
    pub fn parse(sketch: &str) -> Result<Self, MazeError> {
        let rows: Vec<&str> = sketch
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();

        let expected = rows.first().ok_or(MazeError::EmptySketch)?.chars().count();

        let mut walls = Vec::new();
        let mut mover = Vec::new();
        let mut adversaries = Vec::new();
        let mut food = Vec::new();
        let mut pellets = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != expected {
                return Err(MazeError::RaggedRow {
                    row: y,
                    found,
                    expected,
                });
            }

            for (x, glyph) in row.chars().enumerate() {
                let place = Position::new(x as i32, y as i32);
                match glyph {
                    '#' => walls.push(place),
                    ' ' => {}
                    '.' => food.push(place),
                    'o' => pellets.push(place),
                    'P' => mover.push(place),
                    'G' => adversaries.push(place),
                    _ => return Err(MazeError::UnknownGlyph { glyph, x, y }),
                }
            }
        }

        if mover.len() != 1 {
            return Err(MazeError::MoverCount(mover.len()));
        }

        let maze = Maze::new(expected as i32, rows.len() as i32, walls);
        let starts: Vec<Position> = mover.into_iter().chain(adversaries).collect();

        if let Some(blocked) = starts
            .iter()
            .chain(food.iter())
            .chain(pellets.iter())
            .find(|p| !maze.is_movable(**p))
        {
            return Err(MazeError::BlockedCell {
                x: blocked.x,
                y: blocked.y,
            });
        }

        Ok(MazeLayout {
            maze,
            starts,
            food,
            pellets,
        })
    }

    /// Number of agents (mover plus adversaries)
    pub fn agent_count(&self) -> usize {
        self.starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_layout_parses() {
        let layout = MazeLayout::parse(CLASSIC_LAYOUT).expect("classic layout should parse");
        assert_eq!(layout.maze.width(), 19);
        assert_eq!(layout.maze.height(), 11);
        assert_eq!(layout.agent_count(), 3);
        assert_eq!(layout.starts[0], Position::new(9, 7));
        assert_eq!(layout.starts[1], Position::new(9, 5));
        assert_eq!(layout.starts[2], Position::new(9, 9));
        assert_eq!(layout.pellets.len(), 4);
        assert!(!layout.food.is_empty());
    }

    #[test]
    fn test_border_is_always_walled() {
        let maze = Maze::new(4, 3, Vec::new());
        assert!(!maze.is_movable(Position::new(0, 1)));
        assert!(!maze.is_movable(Position::new(3, 1)));
        assert!(!maze.is_movable(Position::new(1, 0)));
        assert!(!maze.is_movable(Position::new(1, 2)));
        assert!(maze.is_movable(Position::new(1, 1)));
        assert!(maze.is_movable(Position::new(2, 1)));
        assert!(!maze.is_movable(Position::new(-1, 1)));
        assert!(!maze.is_movable(Position::new(9, 9)));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let result = MazeLayout::parse("#####\n#P #\n#####");
        assert!(matches!(
            result,
            Err(MazeError::RaggedRow {
                row: 1,
                found: 4,
                expected: 5
            })
        ));
    }

    #[test]
    fn test_unknown_glyph_is_rejected() {
        let result = MazeLayout::parse("#####\n#P?.#\n#####");
        assert!(matches!(
            result,
            Err(MazeError::UnknownGlyph { glyph: '?', x: 2, y: 1 })
        ));
    }

    #[test]
    fn test_mover_is_required() {
        assert!(matches!(
            MazeLayout::parse("#####\n#G..#\n#####"),
            Err(MazeError::MoverCount(0))
        ));
        assert!(matches!(MazeLayout::parse(""), Err(MazeError::EmptySketch)));
    }

    #[test]
    fn test_start_on_border_is_blocked() {
        let result = MazeLayout::parse("##P##\n#...#\n#####");
        assert!(matches!(result, Err(MazeError::BlockedCell { x: 2, y: 0 })));
    }
}
