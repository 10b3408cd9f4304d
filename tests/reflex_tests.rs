// One-ply reflex choices

mod common;

use common::{game_from_sketch, GraphState, ManualGraph, TestAction};
use maze_chase::search::{ReflexAgent, SearchAlgorithm};
use maze_chase::types::Direction;

fn fan(scores: &[(TestAction, f32)]) -> GraphState {
    let mut graph = ManualGraph::new();
    graph.add_nodes(&["root", "n0", "n1", "n2"]);
    for (i, (action, score)) in scores.iter().enumerate() {
        let child = format!("n{}", i);
        graph.add_action("root", &child, *action);
        graph.set_params(&child, false, false, *score);
    }
    GraphState::new(graph, "root", 2)
}

#[test]
fn test_reflex_weights_heuristic_twice() {
    let state = fan(&[(TestAction::Left, 3.0), (TestAction::Right, 1.0)]);

    let values = ReflexAgent::default().evaluate_actions(&state, 0);

    assert_eq!(values, vec![(TestAction::Left, 9.0), (TestAction::Right, 3.0)]);
}

#[test]
fn test_reflex_ties_go_to_the_last_action() {
    let state = fan(&[
        (TestAction::Left, 3.0),
        (TestAction::Center, 5.0),
        (TestAction::Right, 5.0),
    ]);

    assert_eq!(
        ReflexAgent::default().choose_action(&state, 0),
        Some(TestAction::Right)
    );
}

#[test]
fn test_reflex_without_actions_is_none() {
    let state = fan(&[]);
    let mut agent = ReflexAgent::new(0.5);
    let origin = state.place_of("root");

    assert_eq!(agent.choose_action(&state, 0), None);
    assert!(agent.solve(&state, origin, origin, 0).is_empty());
}

#[test]
fn test_reflex_mover_takes_adjacent_food() {
    let state = game_from_sketch(
        "#######\n\
         #  .  #\n\
         #  P  #\n\
         #     #\n\
         #######",
    );

    assert_eq!(
        ReflexAgent::default().choose_action(&state, 0),
        Some(Direction::North)
    );
}

#[test]
fn test_reflex_mover_steps_away_from_adversary() {
    // Moving west keeps the single hunter at distance 3 instead of 1
    let state = game_from_sketch(
        "#######\n\
         #  P G#\n\
         #######",
    );

    assert_eq!(
        ReflexAgent::default().choose_action(&state, 0),
        Some(Direction::West)
    );
}
