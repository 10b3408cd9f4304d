// Breadth-first shortest path over the position graph of a state
//
// The graph is never materialized: neighbors come from the state's legal-action view,
// in its declared order, which is what breaks ties between equally short paths.

use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;

use super::SearchAlgorithm;
use crate::state::BasicState;
use crate::types::{AgentId, Position};

/// Actions leading from start to goal plus the positions expanded while finding them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPlan<A> {
    pub actions: Vec<A>,
    /// Positions dequeued and expanded. The goal is dequeued but never expanded.
    pub closed: HashSet<Position>,
}

impl<A> PathPlan<A> {
    fn empty(closed: HashSet<Position>) -> Self {
        PathPlan {
            actions: Vec::new(),
            closed,
        }
    }

    pub fn first_action(&self) -> Option<&A> {
        self.actions.first()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Two-phase BFS: discover predecessors until `goal` is dequeued, then walk back.
///
/// `neighbors` returns the ordered `(destination, action)` pairs of a position.
/// An empty plan means `start == goal` or the goal cannot be reached.
pub fn breadth_first<A, F>(start: Position, goal: Position, mut neighbors: F) -> PathPlan<A>
where
    A: Copy,
    F: FnMut(Position) -> Vec<(Position, A)>,
{
    let mut closed = HashSet::new();
    if start == goal {
        return PathPlan::empty(closed);
    }

    let mut frontier = VecDeque::from([start]);
    let mut discovered = HashSet::from([start]);
    let mut came_from: HashMap<Position, (Position, A)> = HashMap::new();
    let mut reached = false;

    while let Some(current) = frontier.pop_front() {
        if current == goal {
            reached = true;
            break;
        }
        closed.insert(current);

        for (next, action) in neighbors(current) {
            if discovered.insert(next) {
                came_from.insert(next, (current, action));
                frontier.push_back(next);
            }
        }
    }

    if !reached {
        return PathPlan::empty(closed);
    }

    let mut actions = Vec::new();
    let mut cursor = goal;
    while cursor != start {
        match came_from.get(&cursor) {
            Some((previous, action)) => {
                actions.push(*action);
                cursor = *previous;
            }
            None => break,
        }
    }
    actions.reverse();

    PathPlan { actions, closed }
}

/// Reusable pathfinder that remembers the closed set of its latest run
#[derive(Debug, Default, Clone)]
pub struct BreadthFirstSearch {
    last_closed: HashSet<Position>,
}

impl BreadthFirstSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full plan over the basic legal-action view
    pub fn plan<S: BasicState>(
        &mut self,
        state: &S,
        start: Position,
        goal: Position,
    ) -> PathPlan<S::Action> {
        let plan = breadth_first(start, goal, |place| state.legal_actions_as_map(place));
        debug!(
            "BFS {} -> {}: {} actions, {} closed",
            start,
            goal,
            plan.actions.len(),
            plan.closed.len()
        );
        self.last_closed = plan.closed.clone();
        plan
    }

    /// Shortest action sequence from `start` to `goal`
    pub fn solve<S: BasicState>(
        &mut self,
        state: &S,
        start: Position,
        goal: Position,
    ) -> Vec<S::Action> {
        self.plan(state, start, goal).actions
    }

    /// Positions expanded by the most recent call
    pub fn last_closed_nodes(&self) -> &HashSet<Position> {
        &self.last_closed
    }
}

impl<S: BasicState> SearchAlgorithm<S> for BreadthFirstSearch {
    fn solve(
        &mut self,
        state: &S,
        start: Position,
        goal: Position,
        _agent: AgentId,
    ) -> Vec<S::Action> {
        BreadthFirstSearch::solve(self, state, start, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Open 5x5 grid with four unit moves, numbered 0..4 in N/W/S/E order
    fn open_grid(place: Position) -> Vec<(Position, u8)> {
        [(0, -1), (-1, 0), (0, 1), (1, 0)]
            .iter()
            .enumerate()
            .map(|(i, (dx, dy))| (Position::new(place.x + dx, place.y + dy), i as u8))
            .filter(|(p, _)| p.x >= 0 && p.y >= 0 && p.x < 5 && p.y < 5)
            .collect()
    }

    #[test]
    fn test_start_equals_goal_is_empty() {
        let plan = breadth_first(Position::new(2, 2), Position::new(2, 2), open_grid);
        assert!(plan.is_empty());
        assert!(plan.closed.is_empty());
    }

    #[test]
    fn test_path_is_minimal() {
        let plan = breadth_first(Position::new(0, 0), Position::new(3, 2), open_grid);
        assert_eq!(plan.actions.len(), 5);
    }

    #[test]
    fn test_declared_order_breaks_ties() {
        // Both "south then east" and "east then south" are shortest; south is declared first
        let plan = breadth_first(Position::new(0, 0), Position::new(1, 1), open_grid);
        assert_eq!(plan.actions, vec![2, 3]);
    }

    #[test]
    fn test_unreachable_goal_is_empty() {
        let plan = breadth_first(Position::new(0, 0), Position::new(9, 9), open_grid);
        assert!(plan.is_empty());
        assert_eq!(plan.closed.len(), 25);
    }
}
