// Library exports for the maze chase
// The binary and the integration tests drive the game through these modules

pub mod config;
pub mod error;
pub mod game_state;
pub mod maze;
pub mod score;
pub mod search;
pub mod state;
pub mod turn;
pub mod turn_log;
pub mod types;
