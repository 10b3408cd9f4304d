// Per-agent path query that avoids teammates' cells
//
// Built to be moved onto a worker (tokio's blocking pool in the turn driver): it owns a
// snapshot of the state and yields only the first step, so a chaser re-plans every
// round instead of committing to a path toward a target that keeps moving.

use super::bfs::{breadth_first, PathPlan};
use crate::state::BasicState;
use crate::types::{AgentId, Position};

#[derive(Debug, Clone)]
pub struct PersonalizedBfs<S> {
    state: S,
    start: Position,
    goal: Position,
    agent: AgentId,
}

impl<S: BasicState> PersonalizedBfs<S> {
    pub fn new(state: S, start: Position, goal: Position, agent: AgentId) -> Self {
        PersonalizedBfs {
            state,
            start,
            goal,
            agent,
        }
    }

    /// Full plan over the no-kin view of `agent`
    pub fn plan(&self) -> PathPlan<S::Action> {
        breadth_first(self.start, self.goal, |place| {
            self.state.legal_actions_as_map_no_kins(place, self.agent)
        })
    }

    /// First action of the plan, or `None` when already at the goal or cut off from it
    pub fn run(self) -> Option<S::Action> {
        self.plan().first_action().copied()
    }
}
