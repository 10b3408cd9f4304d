// Hand-built graphs for exercising the search algorithms without a maze
//
// Nodes are named by strings and pinned to grid positions so the same graph serves
// path search (through positions) and game-tree search (through node names).

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use maze_chase::game_state::GameState;
use maze_chase::maze::MazeLayout;
use maze_chase::score::ScoringRules;
use maze_chase::state::{BasicState, ExtendedState};
use maze_chase::types::{AgentId, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestAction {
    First,
    Second,
    Third,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeParams {
    win: bool,
    lose: bool,
    score: f32,
}

#[derive(Debug, Default)]
pub struct ManualGraph {
    places: HashMap<String, Position>,
    edges: HashMap<String, Vec<(String, TestAction)>>,
    params: HashMap<String, NodeParams>,
}

impl ManualGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: &str, place: Position) {
        self.places.insert(name.to_string(), place);
    }

    /// Adds nodes at distinct positions along the x axis
    pub fn add_nodes(&mut self, names: &[&str]) {
        for name in names {
            let x = self.places.len() as i32;
            self.add_node(name, Position::new(x, 0));
        }
    }

    pub fn add_action(&mut self, from: &str, to: &str, action: TestAction) {
        self.edges
            .entry(from.to_string())
            .or_default()
            .push((to.to_string(), action));
    }

    pub fn set_params(&mut self, name: &str, win: bool, lose: bool, score: f32) {
        self.params
            .insert(name.to_string(), NodeParams { win, lose, score });
    }

    pub fn place_of(&self, name: &str) -> Position {
        self.places[name]
    }

    fn node_at(&self, place: Position) -> Option<&str> {
        self.places
            .iter()
            .find(|(_, p)| **p == place)
            .map(|(name, _)| name.as_str())
    }

    fn children(&self, name: &str) -> &[(String, TestAction)] {
        self.edges.get(name).map(|e| e.as_slice()).unwrap_or(&[])
    }

    fn params(&self, name: &str) -> NodeParams {
        self.params.get(name).copied().unwrap_or_default()
    }
}

/// A position in a [`ManualGraph`]. Legal actions ignore which agent asks.
#[derive(Debug, Clone)]
pub struct GraphState {
    graph: Arc<ManualGraph>,
    current: String,
    players: usize,
}

impl GraphState {
    pub fn new(graph: ManualGraph, root: &str, players: usize) -> Self {
        GraphState {
            graph: Arc::new(graph),
            current: root.to_string(),
            players,
        }
    }

    pub fn place_of(&self, name: &str) -> Position {
        self.graph.place_of(name)
    }

    pub fn places_of(&self, names: &[&str]) -> HashSet<Position> {
        names.iter().map(|n| self.place_of(n)).collect()
    }
}

impl BasicState for GraphState {
    type Action = TestAction;

    fn legal_actions_as_map(&self, place: Position) -> Vec<(Position, TestAction)> {
        match self.graph.node_at(place) {
            Some(name) => self
                .graph
                .children(name)
                .iter()
                .map(|(to, action)| (self.graph.place_of(to), *action))
                .collect(),
            None => Vec::new(),
        }
    }
}

impl ExtendedState for GraphState {
    type Key = String;

    fn legal_actions(&self, _agent: AgentId) -> Vec<TestAction> {
        self.graph
            .children(&self.current)
            .iter()
            .map(|(_, action)| *action)
            .collect()
    }

    fn successor_state(&self, _agent: AgentId, action: TestAction) -> Self {
        let next = self
            .graph
            .children(&self.current)
            .iter()
            .find(|(_, a)| *a == action)
            .map(|(to, _)| to.clone())
            .expect("action must be legal in the test graph");
        GraphState {
            graph: Arc::clone(&self.graph),
            current: next,
            players: self.players,
        }
    }

    fn is_win(&self) -> bool {
        self.graph.params(&self.current).win
    }

    fn is_lose(&self) -> bool {
        self.graph.params(&self.current).lose
    }

    fn players_number(&self) -> usize {
        self.players
    }

    fn score(&self) -> f32 {
        self.graph.params(&self.current).score
    }

    /// Mirrors the score so leaf values come out doubled
    fn heuristic_evaluation(&self) -> f32 {
        self.score()
    }

    fn key(&self) -> String {
        self.current.clone()
    }
}

pub fn names(list: &[&str]) -> HashSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Live game state over an ASCII sketch with the standard rules
pub fn game_from_sketch(sketch: &str) -> GameState {
    game_with_rules(sketch, ScoringRules::standard())
}

pub fn game_with_rules(sketch: &str, rules: ScoringRules) -> GameState {
    let layout = MazeLayout::parse(sketch).expect("test sketch should parse");
    GameState::new(&layout, Arc::new(rules))
}
