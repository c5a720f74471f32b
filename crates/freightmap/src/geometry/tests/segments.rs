use super::*;
use crate::geometry::{EdgeIndex, resolve_segments};

#[test]
fn forward_traversal_keeps_geometry() {
    let locations = diagonal();
    let geometry = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
    let index = EdgeIndex::build(&[conn_geo("A", "B", &geometry)], &locations);
    let segments = resolve_segments(&path(&["A", "B"]), &index, &locations);
    assert_eq!(segments.len(), 1);
    assert_eq!(coords(&segments[0]), lat_lon(&geometry));
    assert!(segments[0].from_index);
}

#[test]
fn reverse_traversal_reverses_whole_geometry() {
    let locations = diagonal();
    let geometry = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
    let index = EdgeIndex::build(&[conn_geo("A", "B", &geometry)], &locations);
    let segments = resolve_segments(&path(&["B", "A"]), &index, &locations);
    assert_eq!(segments.len(), 1);
    assert_eq!(
        coords(&segments[0]),
        lat_lon(&[[2.0, 2.0], [1.0, 1.0], [0.0, 0.0]])
    );
    assert_eq!(segments[0].from, "B");
    assert_eq!(segments[0].to, "A");
}

#[test]
fn reverse_keeps_asymmetric_midpoints_in_order() {
    let locations = diagonal();
    let geometry = [[0.0, 0.0], [0.1, 0.9], [0.7, 0.2], [1.0, 1.0]];
    let index = EdgeIndex::build(&[conn_geo("A", "B", &geometry)], &locations);
    let segments = resolve_segments(&path(&["B", "A"]), &index, &locations);
    let mut expected = lat_lon(&geometry);
    expected.reverse();
    assert_eq!(coords(&segments[0]), expected);
}

#[test]
fn undeclared_pair_falls_back_to_straight_line() {
    let locations = diagonal();
    let index = EdgeIndex::build(&[conn("A", "B")], &locations);
    let segments = resolve_segments(&path(&["A", "C"]), &index, &locations);
    assert_eq!(segments.len(), 1);
    assert_eq!(coords(&segments[0]), vec![[0.0, 0.0], [2.0, 2.0]]);
    assert!(!segments[0].from_index);
}

#[test]
fn multi_leg_path_in_traversal_order() {
    let locations = diagonal();
    let index = EdgeIndex::build(&[conn("A", "B"), conn("C", "B")], &locations);
    let segments = resolve_segments(&path(&["A", "B", "C"]), &index, &locations);
    let pairs: Vec<(&str, &str)> = segments
        .iter()
        .map(|s| (s.from.as_str(), s.to.as_str()))
        .collect();
    assert_eq!(pairs, vec![("A", "B"), ("B", "C")]);
    // C->B declared, traversed B->C: straight line reversed.
    assert_eq!(coords(&segments[1]), vec![[1.0, 1.0], [2.0, 2.0]]);
}

#[test]
fn repeated_pair_gets_distinct_keys() {
    let locations = diagonal();
    let index = EdgeIndex::build(&[conn("A", "B")], &locations);
    let segments = resolve_segments(&path(&["A", "B", "A", "B"]), &index, &locations);
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].key, "0:A->B");
    assert_eq!(segments[1].key, "1:B->A");
    assert_eq!(segments[2].key, "2:A->B");
    assert_ne!(segments[0].key, segments[2].key);
}

#[test]
fn baseline_and_optimized_resolve_independently() {
    let locations = diagonal();
    let index = EdgeIndex::build(&[conn("A", "B"), conn("B", "C")], &locations);
    let optimized = resolve_segments(&path(&["A", "B", "C"]), &index, &locations);
    let baseline = resolve_segments(&path(&["A", "C"]), &index, &locations);
    assert_eq!(optimized.len(), 2);
    assert_eq!(baseline.len(), 1);
    assert_eq!(baseline[0].key, "0:A->C");
}
