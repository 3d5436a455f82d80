use headway::direction::{OrderDecision, Pattern, anchor_positions, compare_early};
use std::sync::Arc;

fn visits(stops: &[&str]) -> Vec<Arc<str>> {
    stops.iter().map(|stop| Arc::from(*stop)).collect()
}

#[test]
fn duplicate_stop_anchors_to_nearest_previous_position() {
    // X occurs at positions 2 and 4. Coming from B (position 1) the
    // earlier occurrence is the right one.
    let pattern = Pattern::new(["A", "B", "X", "C", "X"]);
    let anchored = anchor_positions(&pattern, &visits(&["B", "X"])).unwrap();
    assert_eq!(anchored, vec![1, 2]);
}

#[test]
fn distance_tie_prefers_the_occurrence_ahead() {
    // From C (position 3) both occurrences of X are one step away; the
    // trip is travelling forward, so position 4 wins.
    let pattern = Pattern::new(["A", "B", "X", "C", "X"]);
    let anchored = anchor_positions(&pattern, &visits(&["C", "X"])).unwrap();
    assert_eq!(anchored, vec![3, 4]);
}

#[test]
fn first_visit_anchors_to_first_occurrence() {
    let pattern = Pattern::new(["A", "B", "X", "C", "X"]);
    let anchored = anchor_positions(&pattern, &visits(&["X", "C"])).unwrap();
    assert_eq!(anchored, vec![2, 3]);
}

#[test]
fn unknown_stop_cannot_be_anchored() {
    let pattern = Pattern::new(["A", "B"]);
    assert!(anchor_positions(&pattern, &visits(&["A", "Z"])).is_none());
}

#[test]
fn compare_early_orders_visits_across_trips() {
    let pattern = Pattern::new(["A", "B", "C", "D"]);
    let trip_a = visits(&["A", "C"]);
    let trip_b = visits(&["B", "D"]);
    assert_eq!(
        compare_early(&pattern, &trip_a, 0, &trip_b, 0),
        OrderDecision::Before
    );
    assert_eq!(
        compare_early(&pattern, &trip_a, 1, &trip_b, 0),
        OrderDecision::After
    );
}

#[test]
fn compare_early_is_unordered_on_equal_positions() {
    let pattern = Pattern::new(["A", "B", "C"]);
    let trip_a = visits(&["A", "B"]);
    let trip_b = visits(&["B", "C"]);
    assert_eq!(
        compare_early(&pattern, &trip_a, 1, &trip_b, 0),
        OrderDecision::Unordered
    );
}

#[test]
fn compare_early_is_unordered_off_pattern() {
    let pattern = Pattern::new(["A", "B"]);
    let trip_a = visits(&["A", "Z"]);
    let trip_b = visits(&["B"]);
    assert_eq!(
        compare_early(&pattern, &trip_a, 0, &trip_b, 0),
        OrderDecision::Unordered
    );
}
