// Bounded-depth minimax over N agents with optional alpha-beta pruning
//
// The mover maximizes and every other agent minimizes. Agents take turns round-robin
// in index order 0..N-1 whatever the mover's index; a ply is complete when the turn
// wraps back to agent 0.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use super::SearchAlgorithm;
use crate::state::ExtendedState;
use crate::types::{AgentId, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pruning {
    Off,
    On,
}

impl From<bool> for Pruning {
    fn from(enabled: bool) -> Self {
        if enabled {
            Pruning::On
        } else {
            Pruning::Off
        }
    }
}

/// Everything a single minimax decision produced
#[derive(Debug, Clone)]
pub struct MinimaxOutcome<A, K> {
    /// Chosen action of the mover, `None` only when the mover cannot move at all
    pub action: Option<A>,
    /// Minimax value of the root
    pub value: f32,
    /// Mover actions taken in the first ply with their backed-up values, in evaluation
    /// order. When the mover is not agent 0 its first-ply decisions sit below the
    /// earlier agents' moves, so one list collects all of them.
    pub root_values: Vec<(A, f32)>,
    /// Keys of every node whose successors were generated plus every evaluated leaf
    pub expanded: HashSet<K>,
    /// Number of branches abandoned by alpha-beta
    pub cutoffs: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Minimax {
    depth: u32,
    pruning: Pruning,
}

/// Per-call scratch state of one search
struct Search<S: ExtendedState> {
    mover: AgentId,
    agents: usize,
    depth: u32,
    pruning: Pruning,
    expanded: HashSet<S::Key>,
    root_values: Vec<(S::Action, f32)>,
    cutoffs: u32,
}

impl Minimax {
    /// `depth` is the number of full rounds to look ahead; values below 1 are raised to 1
    pub fn new(depth: u32, pruning: Pruning) -> Self {
        Minimax {
            depth: depth.max(1),
            pruning,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn pruning(&self) -> Pruning {
        self.pruning
    }

    /// Searches for the mover's best action.
    ///
    /// The choice is the last recorded first-ply action whose value equals the root value.
    pub fn best_action<S: ExtendedState>(
        &self,
        state: &S,
        mover: AgentId,
    ) -> MinimaxOutcome<S::Action, S::Key> {
        let mut search: Search<S> = Search {
            mover,
            agents: state.players_number().max(1),
            depth: self.depth,
            pruning: self.pruning,
            expanded: HashSet::new(),
            root_values: Vec::new(),
            cutoffs: 0,
        };

        let value = search.value(state, 0, 0, f32::NEG_INFINITY, f32::INFINITY);

        let action = search
            .root_values
            .iter()
            .rev()
            .find(|(_, v)| *v == value)
            .or_else(|| search.root_values.first())
            .map(|(action, _)| *action)
            .or_else(|| state.legal_actions(mover).first().copied());

        debug!(
            "Minimax depth {} ({:?}): value {}, {} nodes expanded, {} cutoffs, choice {:?}",
            self.depth,
            self.pruning,
            value,
            search.expanded.len(),
            search.cutoffs,
            action
        );

        MinimaxOutcome {
            action,
            value,
            root_values: search.root_values,
            expanded: search.expanded,
            cutoffs: search.cutoffs,
        }
    }
}

impl<S: ExtendedState> Search<S> {
    fn value(
        &mut self,
        state: &S,
        agent: AgentId,
        plies: u32,
        mut alpha: f32,
        mut beta: f32,
    ) -> f32 {
        if state.is_win() || state.is_lose() || plies >= self.depth {
            self.expanded.insert(state.key());
            return state.score() + state.heuristic_evaluation();
        }

        let next_agent = (agent + 1) % self.agents;
        let next_plies = if next_agent == 0 {
            plies + 1
        } else {
            plies
        };

        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            // A stuck agent passes its turn
            return self.value(state, next_agent, next_plies, alpha, beta);
        }

        self.expanded.insert(state.key());
        let pruning = self.pruning == Pruning::On;

        if agent == self.mover {
            let mut best = f32::NEG_INFINITY;
            for action in actions {
                let child = state.successor_state(agent, action);
                let v = self.value(&child, next_agent, next_plies, alpha, beta);
                if plies == 0 {
                    self.root_values.push((action, v));
                }
                best = best.max(v);
                if pruning {
                    if best > beta {
                        self.cutoffs += 1;
                        return best;
                    }
                    alpha = alpha.max(best);
                }
            }
            best
        } else {
            let mut best = f32::INFINITY;
            for action in actions {
                let child = state.successor_state(agent, action);
                let v = self.value(&child, next_agent, next_plies, alpha, beta);
                best = best.min(v);
                if pruning {
                    if best < alpha {
                        self.cutoffs += 1;
                        return best;
                    }
                    beta = beta.min(best);
                }
            }
            best
        }
    }
}

impl<S: ExtendedState> SearchAlgorithm<S> for Minimax {
    fn solve(
        &mut self,
        state: &S,
        _start: Position,
        _goal: Position,
        agent: AgentId,
    ) -> Vec<S::Action> {
        self.best_action(state, agent).action.into_iter().collect()
    }
}
