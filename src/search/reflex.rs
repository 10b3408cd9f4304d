// One-ply greedy chooser

use super::SearchAlgorithm;
use crate::state::ExtendedState;
use crate::types::{AgentId, Position};

pub const DEFAULT_HEURISTIC_WEIGHT: f32 = 2.0;

/// Picks the action whose successor maximizes `weight * heuristic + score`
#[derive(Debug, Clone, Copy)]
pub struct ReflexAgent {
    heuristic_weight: f32,
}

impl Default for ReflexAgent {
    fn default() -> Self {
        ReflexAgent::new(DEFAULT_HEURISTIC_WEIGHT)
    }
}

impl ReflexAgent {
    pub fn new(heuristic_weight: f32) -> Self {
        ReflexAgent { heuristic_weight }
    }

    /// Every legal action of `agent` with the value of its successor, in legal-action order
    pub fn evaluate_actions<S: ExtendedState>(
        &self,
        state: &S,
        agent: AgentId,
    ) -> Vec<(S::Action, f32)> {
        state
            .legal_actions(agent)
            .into_iter()
            .map(|action| {
                let next = state.successor_state(agent, action);
                let value = self.heuristic_weight * next.heuristic_evaluation() + next.score();
                (action, value)
            })
            .collect()
    }

    /// Best action for `agent`; on equal values the later action wins
    pub fn choose_action<S: ExtendedState>(&self, state: &S, agent: AgentId) -> Option<S::Action> {
        let mut best: Option<(S::Action, f32)> = None;
        for (action, value) in self.evaluate_actions(state, agent) {
            match best {
                Some((_, top)) if value < top => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
    }
}

impl<S: ExtendedState> SearchAlgorithm<S> for ReflexAgent {
    fn solve(
        &mut self,
        state: &S,
        _start: Position,
        _goal: Position,
        agent: AgentId,
    ) -> Vec<S::Action> {
        self.choose_action(state, agent).into_iter().collect()
    }
}
