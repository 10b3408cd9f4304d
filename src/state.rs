// Capability contracts between the search algorithms and a concrete game
//
// Algorithms never name a game type. Path search needs only BasicState; adversarial
// and reflex search need ExtendedState. Hand-built test graphs and the maze game
// implement the same traits.

use std::fmt::Debug;
use std::hash::Hash;

use crate::types::{AgentId, Position};

/// Position-graph view of a state: which cells can be reached in one action.
pub trait BasicState {
    /// Action type shared by every agent of the game
    type Action: Copy + Eq + Debug;

    /// Ordered `(destination, action)` pairs available from `place`.
    ///
    /// Destinations are unique and every one of them is passable. The order is the
    /// state's declared action order and decides tie-breaks in path search.
    fn legal_actions_as_map(&self, place: Position) -> Vec<(Position, Self::Action)>;

    /// Same as [`BasicState::legal_actions_as_map`] but hides destinations occupied by
    /// other members of `agent`'s team.
    fn legal_actions_as_map_no_kins(
        &self,
        place: Position,
        agent: AgentId,
    ) -> Vec<(Position, Self::Action)> {
        let _ = agent;
        self.legal_actions_as_map(place)
    }
}

/// Full game view used by minimax and the reflex agent.
///
/// `successor_state` must never mutate its receiver, and `score` /
/// `heuristic_evaluation` must be pure functions of the state.
pub trait ExtendedState: BasicState + Sized {
    /// Identity of a node in the game tree, reported in search outcomes
    type Key: Eq + Hash + Clone + Debug;

    fn legal_actions(&self, agent: AgentId) -> Vec<Self::Action>;

    fn successor_state(&self, agent: AgentId, action: Self::Action) -> Self;

    fn is_win(&self) -> bool;

    fn is_lose(&self) -> bool;

    fn players_number(&self) -> usize;

    fn score(&self) -> f32;

    fn heuristic_evaluation(&self) -> f32;

    fn key(&self) -> Self::Key;
}
