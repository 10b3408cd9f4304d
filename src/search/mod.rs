// Search algorithms over the state contracts
//
// bfs finds shortest paths over the position graph, personalized gives the first step
// of a path that avoids teammates, minimax looks ahead adversarially with optional
// alpha-beta pruning, and reflex makes a one-ply greedy choice. None of them keep
// state between calls beyond diagnostics.

pub mod bfs;
pub mod minimax;
pub mod personalized;
pub mod reflex;

pub use bfs::{breadth_first, BreadthFirstSearch, PathPlan};
pub use minimax::{Minimax, MinimaxOutcome, Pruning};
pub use personalized::PersonalizedBfs;
pub use reflex::ReflexAgent;

use crate::state::BasicState;
use crate::types::{AgentId, Position};

/// Uniform entry point so a caller can swap algorithms freely.
///
/// Path search returns a whole plan; minimax and reflex return at most one action and
/// ignore `start` and `goal`.
pub trait SearchAlgorithm<S: BasicState> {
    fn solve(
        &mut self,
        state: &S,
        start: Position,
        goal: Position,
        agent: AgentId,
    ) -> Vec<S::Action>;
}
