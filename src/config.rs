// Configuration module for reading Maze.toml
// Every tunable of an episode lives here: algorithm choice, score and heuristic weights,
// game rules, episode limits and the turn log.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::warn;

use crate::error::MazeError;
use crate::game_state::GameState;
use crate::score::{HeuristicWeights, ScoreWeights, ScoringRules};
use crate::search::reflex::DEFAULT_HEURISTIC_WEIGHT;
use crate::search::{BreadthFirstSearch, Minimax, Pruning, ReflexAgent, SearchAlgorithm};

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub scores: ScoreWeights,
    pub heuristic: HeuristicWeights,
    pub rules: RulesConfig,
    pub episode: EpisodeConfig,
    pub debug: DebugConfig,
}

/// Which algorithm steers the mover
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Follow shortest paths to the nearest food
    Bfs,
    Minimax,
    Reflex,
}

/// Mover search parameters
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    /// Minimax look-ahead in full rounds
    pub depth: u32,
    pub pruning: bool,
    pub reflex_heuristic_weight: f32,
}

impl SearchConfig {
    pub fn minimax(&self) -> Minimax {
        Minimax::new(self.depth, Pruning::from(self.pruning))
    }

    pub fn reflex(&self) -> ReflexAgent {
        ReflexAgent::new(self.reflex_heuristic_weight)
    }

    /// Algorithm the turn driver consults whenever the mover's plan runs out
    pub fn mover_algorithm(&self) -> Box<dyn SearchAlgorithm<GameState> + Send> {
        match self.algorithm {
            Algorithm::Bfs => Box::new(BreadthFirstSearch::new()),
            Algorithm::Minimax => Box::new(self.minimax()),
            Algorithm::Reflex => Box::new(self.reflex()),
        }
    }
}

/// Game rules
#[derive(Debug, Deserialize, Clone)]
pub struct RulesConfig {
    /// Rounds a pellet keeps the adversaries confused
    pub confusion_duration: u32,
}

/// Episode limits
#[derive(Debug, Deserialize, Clone)]
pub struct EpisodeConfig {
    pub max_rounds: u32,
    /// Fixed seed for the confused adversaries' wandering; random when absent
    pub rng_seed: Option<u64>,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Maze.toml configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MazeError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|source| MazeError::ConfigRead {
            path: path.as_ref().to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, MazeError> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads default configuration from Maze.toml in the project root
    pub fn load_default() -> Result<Self, MazeError> {
        Self::from_file("Maze.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Maze.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                algorithm: Algorithm::Minimax,
                depth: 3,
                pruning: true,
                reflex_heuristic_weight: DEFAULT_HEURISTIC_WEIGHT,
            },
            scores: ScoreWeights::default(),
            heuristic: HeuristicWeights::default(),
            rules: RulesConfig {
                confusion_duration: 20,
            },
            episode: EpisodeConfig {
                max_rounds: 500,
                rng_seed: None,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "maze_turns.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("Could not load Maze.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }

    /// Scoring rules shared by every state of an episode
    pub fn scoring_rules(&self) -> Arc<ScoringRules> {
        Arc::new(ScoringRules::new(
            self.scores,
            self.heuristic,
            self.rules.confusion_duration,
        ))
    }
}
