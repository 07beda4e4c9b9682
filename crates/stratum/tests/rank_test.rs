use std::collections::BTreeMap;
use stratum::graphlib::Graph;
use stratum::{acyclic, rank};

fn graph(entries: &[(&str, &[&str])]) -> Graph {
    entries
        .iter()
        .map(|(v, ws)| (v.to_string(), ws.iter().map(|w| w.to_string()).collect()))
        .collect()
}

fn layers(g: &Graph) -> BTreeMap<String, usize> {
    rank::longest_path(g, &acyclic::feedback_edges(g))
}

fn expect(pairs: &[(&str, usize)]) -> BTreeMap<String, usize> {
    pairs.iter().map(|(v, l)| (v.to_string(), *l)).collect()
}

#[test]
fn longest_path_ranks_dependencies_on_top_after_reverse() {
    let g = graph(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[])]);
    assert_eq!(layers(&g.reverse()), expect(&[("a", 2), ("b", 1), ("c", 0)]));
}

#[test]
fn longest_path_follows_edge_direction() {
    let g = graph(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[])]);
    assert_eq!(layers(&g), expect(&[("a", 0), ("b", 1), ("c", 2)]));
}

#[test]
fn longest_path_uses_the_longest_of_several_paths() {
    let g = graph(&[
        ("a", &["b", "e", "f"]),
        ("b", &["c"]),
        ("c", &["d"]),
        ("d", &["h"]),
        ("e", &["g"]),
        ("f", &["g"]),
        ("g", &["h"]),
        ("h", &[]),
    ]);
    let l = layers(&g);
    assert_eq!(l["h"], 4);
    assert_eq!(l["g"], 2);
    assert!(rank::non_monotone_edges(&g, &l).is_empty());
}

#[test]
fn isolated_nodes_sit_on_layer_zero() {
    let g = graph(&[("a", &[]), ("b", &[])]);
    assert_eq!(layers(&g), expect(&[("a", 0), ("b", 0)]));
}

#[test]
fn self_loops_do_not_constrain_layers() {
    let g = graph(&[("a", &["a", "b"]), ("b", &["b"])]);
    assert_eq!(layers(&g), expect(&[("a", 0), ("b", 1)]));
}

#[test]
fn a_pure_cycle_starts_from_the_smallest_identifier() {
    let g = graph(&[("c", &["a"]), ("a", &["b"]), ("b", &["c"])]);
    assert_eq!(layers(&g), expect(&[("a", 0), ("b", 1), ("c", 2)]));
}

#[test]
fn a_cycle_hanging_off_a_source_is_entered_from_the_source() {
    let g = graph(&[("s", &["y"]), ("x", &["y"]), ("y", &["x"])]);
    // x is only reached through y, so x -> y is the edge that closes the cycle.
    assert_eq!(layers(&g), expect(&[("s", 0), ("x", 2), ("y", 1)]));
}

#[test]
fn longest_path_skips_cycle_edges_missing_from_the_feedback_set() {
    let g = graph(&[("a", &["b"]), ("b", &["a"])]);
    let l = rank::longest_path(&g, &Default::default());
    assert_eq!(l.len(), 2);
    assert!(l.values().all(|&layer| layer <= 1));
}
