// Error type for the fallible edges of the crate: maze sketches and configuration files.
// Search outcomes (empty plans, fallback moves) are ordinary values, not errors.

use std::path::PathBuf;

/// Errors raised while building a maze or loading configuration
#[derive(thiserror::Error, Debug)]
pub enum MazeError {
    /// The sketch contained no rows
    #[error("maze sketch is empty")]
    EmptySketch,

    /// Every row of a sketch must have the same width
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// A glyph that is not part of the sketch alphabet
    #[error("unknown glyph '{glyph}' at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },

    /// The sketch has no mover start, or more than one
    #[error("expected exactly one mover start, found {0}")]
    MoverCount(usize),

    /// A start, food or pellet sits on a wall (border cells are always walls)
    #[error("cell ({x}, {y}) is not passable")]
    BlockedCell { x: i32, y: i32 },

    /// Configuration file could not be read
    #[error("failed to read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::config::Config`]
    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
