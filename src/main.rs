use anyhow::Context;
use log::info;
use std::env;

use maze_chase::config::Config;
use maze_chase::game_state::GameState;
use maze_chase::maze::{MazeLayout, CLASSIC_LAYOUT};
use maze_chase::turn::{rng_from_seed, TurnDriver};
use maze_chase::turn_log::TurnLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    // Optional first argument: path to a config file other than ./Maze.toml
    let config = match env::args().nth(1) {
        Some(path) => Config::from_file(&path).with_context(|| format!("loading {}", path))?,
        None => Config::load_or_default(),
    };

    let layout = MazeLayout::parse(CLASSIC_LAYOUT).context("parsing built-in maze")?;
    info!(
        "Starting maze chase: {}x{} maze, {} adversaries, {:?} search",
        layout.maze.width(),
        layout.maze.height(),
        layout.agent_count() - 1,
        config.search.algorithm
    );

    let state = GameState::new(&layout, config.scoring_rules());
    let logger = TurnLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let mut driver = TurnDriver::new(
        state,
        config.search.mover_algorithm(),
        rng_from_seed(config.episode.rng_seed),
    )
    .with_logger(logger);

    let summary = driver.play_episode(config.episode.max_rounds).await;

    info!(
        "Episode finished after {} rounds: won {}, lost {}, score {}, food left {}",
        summary.rounds, summary.won, summary.lost, summary.score, summary.food_left
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
