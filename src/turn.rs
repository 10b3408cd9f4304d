// Round-by-round orchestration of one live GameState
//
// Order within a round: the mover acts first, then every adversary in increasing index
// order. Hunting adversaries plan on tokio's blocking pool, one task at a time, each
// awaited before the next is submitted. Confused adversaries wander at random and
// adversaries captured this round sit out. The round ends with GameState::finish_turn.

use std::collections::VecDeque;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::game_state::{ActionOutcome, GameState, TurnSummary};
use crate::score::ScoreCounter;
use crate::search::{PersonalizedBfs, SearchAlgorithm};
use crate::state::ExtendedState;
use crate::turn_log::TurnLogger;
use crate::types::{AgentId, Direction};

/// What happened during one round
#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    pub round: u32,
    /// Applied actions in the order they happened
    pub outcomes: Vec<ActionOutcome>,
    /// Agents that produced no action (stuck, no plan, or an interrupted task)
    pub idle: Vec<AgentId>,
    /// Adversaries that skipped the round after being captured
    pub sat_out: Vec<AgentId>,
    pub summary: TurnSummary,
    pub score: f32,
}

impl RoundReport {
    /// Action applied for `agent` this round, if any
    pub fn outcome_for(&self, agent: AgentId) -> Option<&ActionOutcome> {
        self.outcomes.iter().find(|o| o.agent == agent)
    }
}

/// Final result of an episode
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeSummary {
    pub rounds: u32,
    pub won: bool,
    pub lost: bool,
    pub score: f32,
    pub counter: ScoreCounter,
    pub food_left: usize,
}

/// Seeded generator when a seed is given, otherwise seeded from the OS
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

pub struct TurnDriver {
    state: GameState,
    algorithm: Box<dyn SearchAlgorithm<GameState> + Send>,
    plan: VecDeque<Direction>,
    rng: StdRng,
    round: u32,
    logger: TurnLogger,
}

impl TurnDriver {
    pub fn new(
        state: GameState,
        algorithm: Box<dyn SearchAlgorithm<GameState> + Send>,
        rng: StdRng,
    ) -> Self {
        TurnDriver {
            state,
            algorithm,
            plan: VecDeque::new(),
            rng,
            round: 0,
            logger: TurnLogger::disabled(),
        }
    }

    pub fn with_logger(mut self, logger: TurnLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Rounds played so far
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Plays one full round and returns what happened
    pub async fn play_round(&mut self) -> RoundReport {
        self.round += 1;
        let round = self.round;

        let mut outcomes = Vec::new();
        let mut idle = Vec::new();
        let mut sat_out = Vec::new();

        let mover = self.state.mover();
        if !self.state.is_terminal() {
            match self.next_mover_action() {
                Some(action) => outcomes.push(self.state.apply_action(mover, action)),
                None => idle.push(mover),
            }
        }

        let adversaries: Vec<AgentId> = self.state.adversaries().collect();
        for id in adversaries {
            if self.state.is_terminal() {
                break;
            }
            if self.state.is_sitting_out(id) {
                sat_out.push(id);
                continue;
            }

            let action = if self.state.is_confused(id) {
                self.wander(id)
            } else {
                self.hunt(id).await
            };

            match action {
                Some(action) => outcomes.push(self.state.apply_action(id, action)),
                None => idle.push(id),
            }
        }

        let summary = self.state.finish_turn();
        let score = self.state.score();

        info!(
            "Round {}: score {}, food left {}, won {}, lost {}",
            round,
            score,
            self.state.food().len(),
            summary.won,
            summary.lost
        );

        let report = RoundReport {
            round,
            outcomes,
            idle,
            sat_out,
            summary,
            score,
        };
        self.logger.log_round(report.clone());
        report
    }

    /// Plays until the state is won or lost, or `max_rounds` more rounds have passed
    pub async fn play_episode(&mut self, max_rounds: u32) -> EpisodeSummary {
        let mut played = 0;
        while played < max_rounds && !self.state.is_terminal() {
            self.play_round().await;
            played += 1;
        }

        if !self.state.is_terminal() {
            warn!("Episode stopped after {} rounds without a result", self.round);
        }
        self.logger.flush().await;

        EpisodeSummary {
            rounds: self.round,
            won: self.state.is_win(),
            lost: self.state.is_lose(),
            score: self.state.score(),
            counter: *self.state.counter(),
            food_left: self.state.food().len(),
        }
    }

    /// Waits for the turn log to write every round played so far
    pub async fn flush_log(&self) {
        self.logger.flush().await;
    }

    /// Pops the mover's queued plan, asking the algorithm for a new one when it runs dry
    fn next_mover_action(&mut self) -> Option<Direction> {
        if self.plan.is_empty() {
            let mover = self.state.mover();
            let start = self.state.position(mover);
            let goal = self.state.nearest_food(start).unwrap_or(start);
            let actions = self.algorithm.solve(&self.state, start, goal, mover);
            debug!("Mover planned {:?} toward {}", actions, goal);
            self.plan.extend(actions);
        }
        self.plan.pop_front()
    }

    /// Random legal move that does not step onto a teammate
    fn wander(&mut self, agent: AgentId) -> Option<Direction> {
        self.state
            .legal_actions_no_kins(agent)
            .choose(&mut self.rng)
            .copied()
    }

    /// First step of a teammate-avoiding path toward the mover, computed off-thread
    async fn hunt(&self, agent: AgentId) -> Option<Direction> {
        let query = PersonalizedBfs::new(
            self.state.clone(),
            self.state.position(agent),
            self.state.position(self.state.mover()),
            agent,
        );

        join_decision(agent, tokio::task::spawn_blocking(move || query.run())).await
    }
}

/// Awaits an off-thread decision; a panicked or cancelled task leaves the agent idle
pub async fn join_decision<T>(agent: AgentId, task: JoinHandle<Option<T>>) -> Option<T> {
    match task.await {
        Ok(action) => action,
        Err(e) => {
            warn!("Agent {} planning task failed, skipping its move: {}", agent, e);
            None
        }
    }
}
