// Concrete turn-based state of a maze chase
//
// One GameState type serves two roles: search algorithms clone it through
// `successor_state`, and the turn driver advances the single live instance in place
// through `apply_action` and `finish_turn`. Both paths run the same `perform` routine so
// search and play can never disagree about the rules.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::maze::{Maze, MazeLayout};
use crate::score::{HeuristicInputs, ScoreCounter, ScoringRules};
use crate::state::{BasicState, ExtendedState};
use crate::types::{AgentId, Direction, Position};

/// Something that happened while an action was applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    AteFood { at: Position },
    AtePellet { at: Position },
    /// A confused adversary was caught and sent back to its start
    Captured { agent: AgentId, respawn: Position },
    /// The mover ran into an adversary that is not confused
    MoverCaught { by: AgentId },
}

/// Result of one live action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub agent: AgentId,
    pub action: Direction,
    /// Degree code of `action`
    pub heading: u16,
    /// Position of `agent` after the action, respawn included
    pub position: Position,
    pub events: Vec<GameEvent>,
}

/// Result of the end-of-round bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnSummary {
    pub confusion_ended: bool,
    pub won: bool,
    pub lost: bool,
}

/// Hashable identity of a state, used to report which search nodes were expanded.
///
/// Two states share a key only when every rule-relevant field matches: food and pellet
/// cells (sorted), confusion flags and countdown, the score counter and sit-out marks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub positions: Vec<Position>,
    pub food: Vec<Position>,
    pub pellets: Vec<Position>,
    pub confused: Vec<bool>,
    pub countdown: u32,
    pub counter: ScoreCounter,
    pub sitting_out: Vec<bool>,
    pub won: bool,
    pub lost: bool,
}

#[derive(Debug, Clone)]
pub struct GameState {
    maze: Arc<Maze>,
    rules: Arc<ScoringRules>,
    starts: Arc<Vec<Position>>,
    mover: AgentId,
    positions: Vec<Position>,
    food: HashSet<Position>,
    pellets: HashSet<Position>,
    confused: Vec<bool>,
    countdown: u32,
    counter: ScoreCounter,
    won: bool,
    lost: bool,
    sitting_out: Vec<bool>,
}

impl GameState {
    /// Creates the initial state of an episode. Agent 0 of the layout is the mover.
    pub fn new(layout: &MazeLayout, rules: Arc<ScoringRules>) -> Self {
        let agents = layout.starts.len();
        GameState {
            maze: Arc::new(layout.maze.clone()),
            rules,
            starts: Arc::new(layout.starts.clone()),
            mover: 0,
            positions: layout.starts.clone(),
            food: layout.food.iter().copied().collect(),
            pellets: layout.pellets.iter().copied().collect(),
            confused: vec![false; agents],
            countdown: 0,
            counter: ScoreCounter::default(),
            won: false,
            lost: false,
            sitting_out: vec![false; agents],
        }
    }

    // ------------------------------------------------------------------
    // Live mutation
    // ------------------------------------------------------------------

    /// Applies `action` for `agent` to this state in place.
    ///
    /// Does nothing (and reports no events) once the state is won or lost.
    pub fn apply_action(&mut self, agent: AgentId, action: Direction) -> ActionOutcome {
        let events = self.perform(agent, action);
        ActionOutcome {
            agent,
            action,
            heading: action.degrees(),
            position: self.positions[agent],
            events,
        }
    }

    /// End-of-round bookkeeping: advances the confusion countdown, clears sit-out
    /// marks and declares a win once the food is gone.
    pub fn finish_turn(&mut self) -> TurnSummary {
        let mut confusion_ended = false;

        if self.countdown > 0 {
            self.countdown -= 1;
        }
        if self.countdown == 0 && self.confused.iter().any(|c| *c) {
            self.confused.iter_mut().for_each(|c| *c = false);
            confusion_ended = true;
        }

        self.sitting_out.iter_mut().for_each(|s| *s = false);

        if self.food.is_empty() && !self.lost {
            self.won = true;
        }

        TurnSummary {
            confusion_ended,
            won: self.won,
            lost: self.lost,
        }
    }

    fn perform(&mut self, agent: AgentId, action: Direction) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.is_terminal() {
            return events;
        }

        let destination = action.apply(&self.positions[agent]);
        self.positions[agent] = destination;

        let mover_at = self.positions[self.mover];
        if let Some(by) = self.hunter_at(mover_at) {
            self.lost = true;
            events.push(GameEvent::MoverCaught { by });
            return events;
        }

        if agent == self.mover {
            self.counter.steps += 1;

            if self.food.remove(&destination) {
                self.counter.food_eaten += 1;
                events.push(GameEvent::AteFood { at: destination });
            }

            if self.pellets.remove(&destination) {
                self.counter.pellets_eaten += 1;
                let mover = self.mover;
                for (id, flag) in self.confused.iter_mut().enumerate() {
                    if id != mover {
                        *flag = true;
                    }
                }
                self.countdown = self.rules.confusion_duration;
                events.push(GameEvent::AtePellet { at: destination });
            }
        }

        for id in self.adversaries() {
            if self.confused[id] && self.positions[id] == mover_at {
                let respawn = self.starts[id];
                self.counter.captures += 1;
                self.confused[id] = false;
                self.positions[id] = respawn;
                self.sitting_out[id] = true;
                events.push(GameEvent::Captured { agent: id, respawn });
            }
        }

        events
    }

    /// First unconfused adversary standing on `place`
    fn hunter_at(&self, place: Position) -> Option<AgentId> {
        self.adversaries()
            .find(|id| !self.confused[*id] && self.positions[*id] == place)
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn mover(&self) -> AgentId {
        self.mover
    }

    /// Indices of every agent other than the mover, in increasing order
    pub fn adversaries(&self) -> impl Iterator<Item = AgentId> {
        let mover = self.mover;
        (0..self.positions.len()).filter(move |id| *id != mover)
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn position(&self, agent: AgentId) -> Position {
        self.positions[agent]
    }

    pub fn start(&self, agent: AgentId) -> Position {
        self.starts[agent]
    }

    pub fn food(&self) -> &HashSet<Position> {
        &self.food
    }

    pub fn pellets(&self) -> &HashSet<Position> {
        &self.pellets
    }

    pub fn is_confused(&self, agent: AgentId) -> bool {
        self.confused[agent]
    }

    pub fn confusion_countdown(&self) -> u32 {
        self.countdown
    }

    pub fn counter(&self) -> &ScoreCounter {
        &self.counter
    }

    /// True while a captured adversary waits out the current round
    pub fn is_sitting_out(&self, agent: AgentId) -> bool {
        self.sitting_out[agent]
    }

    pub fn is_terminal(&self) -> bool {
        self.won || self.lost
    }

    /// Closest food cell by Manhattan distance; ties go to the smallest position
    pub fn nearest_food(&self, from: Position) -> Option<Position> {
        self.food
            .iter()
            .min_by_key(|p| (from.manhattan(p), **p))
            .copied()
    }

    /// Legal actions of `agent` that avoid cells held by its teammates
    pub fn legal_actions_no_kins(&self, agent: AgentId) -> Vec<Direction> {
        self.legal_actions_as_map_no_kins(self.positions[agent], agent)
            .into_iter()
            .map(|(_, action)| action)
            .collect()
    }

    fn heuristic_inputs(&self) -> HeuristicInputs {
        let at = self.positions[self.mover];

        let nearest_food = self.food.iter().map(|p| at.manhattan(p)).min();

        let hunting_distance_sum = self
            .adversaries()
            .filter(|id| !self.confused[*id])
            .map(|id| at.manhattan(&self.positions[id]))
            .sum();

        let nearest_confused = self
            .adversaries()
            .filter(|id| self.confused[*id])
            .map(|id| at.manhattan(&self.positions[id]))
            .min();

        HeuristicInputs {
            nearest_food,
            food_count: self.food.len(),
            hunting_distance_sum,
            nearest_confused,
        }
    }
}

impl BasicState for GameState {
    type Action = Direction;

    fn legal_actions_as_map(&self, place: Position) -> Vec<(Position, Direction)> {
        Direction::all()
            .into_iter()
            .map(|dir| (dir.apply(&place), dir))
            .filter(|(dest, _)| self.maze.is_movable(*dest))
            .collect()
    }

    fn legal_actions_as_map_no_kins(
        &self,
        place: Position,
        agent: AgentId,
    ) -> Vec<(Position, Direction)> {
        let moves = self.legal_actions_as_map(place);
        if agent == self.mover {
            return moves;
        }

        let kin: HashSet<Position> = self
            .adversaries()
            .filter(|id| *id != agent)
            .map(|id| self.positions[id])
            .collect();

        moves
            .into_iter()
            .filter(|(dest, _)| !kin.contains(dest))
            .collect()
    }
}

impl ExtendedState for GameState {
    type Key = StateKey;

    fn legal_actions(&self, agent: AgentId) -> Vec<Direction> {
        self.legal_actions_as_map(self.positions[agent])
            .into_iter()
            .map(|(_, action)| action)
            .collect()
    }

    fn successor_state(&self, agent: AgentId, action: Direction) -> Self {
        let mut next = self.clone();
        next.perform(agent, action);
        next
    }

    fn is_win(&self) -> bool {
        self.won
    }

    fn is_lose(&self) -> bool {
        self.lost
    }

    fn players_number(&self) -> usize {
        self.positions.len()
    }

    fn score(&self) -> f32 {
        self.counter.total(&self.rules.scores, self.won, self.lost)
    }

    fn heuristic_evaluation(&self) -> f32 {
        self.rules.heuristic.evaluate(&self.heuristic_inputs())
    }

    fn key(&self) -> StateKey {
        let mut food: Vec<Position> = self.food.iter().copied().collect();
        food.sort_unstable();
        let mut pellets: Vec<Position> = self.pellets.iter().copied().collect();
        pellets.sort_unstable();

        StateKey {
            positions: self.positions.clone(),
            food,
            pellets,
            confused: self.confused.clone(),
            countdown: self.countdown,
            counter: self.counter,
            sitting_out: self.sitting_out.clone(),
            won: self.won,
            lost: self.lost,
        }
    }
}
