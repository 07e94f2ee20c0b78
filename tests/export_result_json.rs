//! Exporting a `SearchResult` as JSON for other tools to consume.

use eight_puzzle_solver::engine::{Goal, State};
use eight_puzzle_solver::heuristics::Heuristic;
use eight_puzzle_solver::solver::a_star_search;

#[test]
fn test_export_two_move_solution() {
    let goal = Goal::standard();
    let initial = State::new([1, 2, 3, 4, 0, 5, 7, 8, 6]);

    let result = a_star_search(&initial, &goal, Heuristic::Manhattan).unwrap();
    let json = result.to_json().expect("Failed to serialize");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("Failed to parse JSON");

    assert_eq!(parsed["path"], serde_json::json!(["Right", "Down"]));
    assert_eq!(parsed["cost"], 2);
    assert_eq!(parsed["nodes_expanded"], 2);
    assert!(parsed["elapsed_time"].is_f64());
    assert!(parsed["elapsed_time"].as_f64().unwrap() >= 0.0);
}

#[test]
fn test_export_goal_state() {
    let goal = Goal::standard();
    let result = a_star_search(goal.state(), &goal, Heuristic::Euclidean).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

    assert_eq!(parsed["path"], serde_json::json!([]));
    assert_eq!(parsed["cost"], 0);
    assert_eq!(parsed["nodes_expanded"], 0);
}
