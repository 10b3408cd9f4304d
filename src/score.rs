// Score bookkeeping and the heuristic evaluation terms
//
// Weights are plain data so they can be deserialized straight from the `scores` and
// `heuristic` sections of Maze.toml. GameState owns a ScoreCounter and an Arc<ScoringRules>.

use serde::{Deserialize, Serialize};

/// Points awarded per counted event
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub step_penalty: f32,
    pub food: f32,
    pub pellet: f32,
    pub capture: f32,
    pub win: f32,
    pub lose: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            step_penalty: -1.0,
            food: 5.0,
            pellet: 10.0,
            capture: 50.0,
            win: 500.0,
            lose: -500.0,
        }
    }
}

/// Multipliers for the four heuristic terms
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct HeuristicWeights {
    pub nearest_food_weight: f32,
    pub food_count_weight: f32,
    pub adversary_weight: f32,
    /// The adversary term only applies while the summed distance is below this value
    pub adversary_proximity_threshold: i32,
    pub confused_weight: f32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        HeuristicWeights {
            nearest_food_weight: 2.0,
            food_count_weight: 1.0,
            adversary_weight: 20.0,
            adversary_proximity_threshold: 7,
            confused_weight: 5.0,
        }
    }
}

/// Distances the heuristic is computed from, measured from the mover
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeuristicInputs {
    pub nearest_food: Option<i32>,
    pub food_count: usize,
    /// Sum of distances to every adversary that is not confused
    pub hunting_distance_sum: i32,
    pub nearest_confused: Option<i32>,
}

impl HeuristicWeights {
    /// Combines the heuristic terms. A zero distance or an empty set contributes nothing.
    pub fn evaluate(&self, inputs: &HeuristicInputs) -> f32 {
        let mut evaluation = 0.0;

        if let Some(d) = inputs.nearest_food.filter(|d| *d != 0) {
            evaluation += self.nearest_food_weight / d as f32;
        }

        if inputs.food_count != 0 {
            evaluation += self.food_count_weight / inputs.food_count as f32;
        }

        let sum = inputs.hunting_distance_sum;
        if sum != 0 && sum < self.adversary_proximity_threshold {
            evaluation -= self.adversary_weight / sum as f32;
        }

        if let Some(d) = inputs.nearest_confused.filter(|d| *d != 0) {
            evaluation += self.confused_weight / d as f32;
        }

        evaluation
    }
}

/// Everything a state needs to score itself; shared by every state of a lineage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringRules {
    pub scores: ScoreWeights,
    pub heuristic: HeuristicWeights,
    /// Rounds a pellet keeps the adversaries confused
    pub confusion_duration: u32,
}

impl ScoringRules {
    pub fn new(scores: ScoreWeights, heuristic: HeuristicWeights, confusion_duration: u32) -> Self {
        ScoringRules {
            scores,
            heuristic,
            confusion_duration,
        }
    }

    /// Default weights with the standard 20-round confusion window
    pub fn standard() -> Self {
        ScoringRules::new(ScoreWeights::default(), HeuristicWeights::default(), 20)
    }
}

/// Event counters accumulated by the mover
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ScoreCounter {
    pub steps: u32,
    pub food_eaten: u32,
    pub pellets_eaten: u32,
    pub captures: u32,
}

impl ScoreCounter {
    /// Total score including the terminal bonus, if any
    pub fn total(&self, weights: &ScoreWeights, won: bool, lost: bool) -> f32 {
        let mut score = weights.step_penalty * self.steps as f32
            + weights.food * self.food_eaten as f32
            + weights.pellet * self.pellets_eaten as f32
            + weights.capture * self.captures as f32;
        if won {
            score += weights.win;
        }
        if lost {
            score += weights.lose;
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_combines_counters() {
        let counter = ScoreCounter {
            steps: 10,
            food_eaten: 4,
            pellets_eaten: 1,
            captures: 2,
        };
        let weights = ScoreWeights::default();
        assert_eq!(counter.total(&weights, false, false), -10.0 + 20.0 + 10.0 + 100.0);
        assert_eq!(counter.total(&weights, true, false), 620.0);
        assert_eq!(counter.total(&weights, false, true), -380.0);
    }

    #[test]
    fn test_fresh_counter_scores_zero() {
        assert_eq!(ScoreCounter::default().total(&ScoreWeights::default(), false, false), 0.0);
    }

    #[test]
    fn test_heuristic_terms() {
        let weights = HeuristicWeights::default();

        let food_only = HeuristicInputs {
            nearest_food: Some(4),
            food_count: 2,
            hunting_distance_sum: 0,
            nearest_confused: None,
        };
        assert_eq!(weights.evaluate(&food_only), 0.5 + 0.5);

        let threatened = HeuristicInputs {
            hunting_distance_sum: 4,
            ..food_only
        };
        assert_eq!(weights.evaluate(&threatened), 1.0 - 5.0);

        let chasing = HeuristicInputs {
            nearest_confused: Some(5),
            ..food_only
        };
        assert_eq!(weights.evaluate(&chasing), 2.0);
    }

    #[test]
    fn test_far_adversaries_are_ignored() {
        let weights = HeuristicWeights::default();
        let inputs = HeuristicInputs {
            hunting_distance_sum: 7,
            ..Default::default()
        };
        assert_eq!(weights.evaluate(&inputs), 0.0);
    }

    #[test]
    fn test_zero_distances_contribute_nothing() {
        let weights = HeuristicWeights::default();
        let inputs = HeuristicInputs {
            nearest_food: Some(0),
            food_count: 0,
            hunting_distance_sum: 0,
            nearest_confused: Some(0),
        };
        assert_eq!(weights.evaluate(&inputs), 0.0);
    }
}
