use stratum_graphlib::{Error, Graph};
use std::collections::BTreeSet;
use std::num::NonZeroUsize;

fn graph(entries: &[(&str, &[&str])]) -> Graph {
    entries
        .iter()
        .map(|(v, ws)| (v.to_string(), ws.iter().map(|w| w.to_string()).collect()))
        .collect()
}

fn edges(pairs: &[(&str, &str)]) -> BTreeSet<(String, String)> {
    pairs
        .iter()
        .map(|(v, w)| (v.to_string(), w.to_string()))
        .collect()
}

#[test]
fn graph_counts_nodes_and_edges() {
    let g = graph(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[])]);
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 3);
    assert_eq!(g.nodes().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(g.successors("a"), ["b".to_string(), "c".to_string()]);
    assert!(g.successors("missing").is_empty());
}

#[test]
fn edges_are_enumerated_by_source_then_stored_order() {
    let g = graph(&[("b", &["c", "a"]), ("a", &["c"]), ("c", &[])]);
    let all: Vec<(&str, &str)> = g.edges().collect();
    assert_eq!(all, vec![("a", "c"), ("b", "c"), ("b", "a")]);
}

#[test]
fn validate_accepts_a_closed_graph() {
    let g = graph(&[("a", &["b"]), ("b", &["a"])]);
    assert!(g.validate().is_ok());
}

#[test]
fn validate_reports_the_dangling_pair() {
    let g = graph(&[("a", &["b"]), ("b", &["z"])]);
    match g.validate() {
        Err(Error::DanglingReference { node, target }) => {
            assert_eq!(node, "b");
            assert_eq!(target, "z");
        }
        other => panic!("expected dangling reference, got {other:?}"),
    }
}

#[test]
fn reverse_flips_every_edge() {
    let g = graph(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[])]);
    let r = g.reverse();
    assert_eq!(r, graph(&[("a", &[]), ("b", &["a"]), ("c", &["a", "b"])]));
    assert_eq!(r.node_count(), g.node_count());
    assert_eq!(r.edge_count(), g.edge_count());
}

#[test]
fn reverse_twice_keeps_the_edge_set() {
    let g = graph(&[("b", &["c", "a"]), ("a", &["c"]), ("c", &["b"])]);
    let rr = g.reverse().reverse();
    assert_eq!(rr.edge_set(), g.edge_set());
    assert_eq!(rr.nodes().collect::<Vec<_>>(), g.nodes().collect::<Vec<_>>());
}

#[test]
fn reverse_leaves_the_original_untouched() {
    let g = graph(&[("a", &["b"]), ("b", &[])]);
    let before = g.clone();
    let _ = g.reverse();
    assert_eq!(g, before);
}

#[test]
fn rename_merges_colliding_nodes_in_source_order() {
    let g = graph(&[("a", &["x"]), ("b", &["y"])]);
    let renamed = g
        .rename(|id| {
            Ok::<_, String>(match id {
                "a" | "b" => "m".to_string(),
                other => other.to_string(),
            })
        })
        .unwrap();
    assert_eq!(renamed, graph(&[("m", &["x", "y"]), ("x", &[]), ("y", &[])]));
}

#[test]
fn rename_keeps_duplicate_edges_after_a_merge() {
    let g = graph(&[("p/a", &["q"]), ("p/b", &["q"]), ("q", &[])]);
    let renamed = g
        .rename(|id| Ok::<_, String>(id.split('/').next().unwrap_or(id).to_string()))
        .unwrap();
    assert_eq!(renamed.successors("p"), ["q".to_string(), "q".to_string()]);
    assert_eq!(renamed.node_count(), 2);
}

#[test]
fn rename_is_all_or_nothing() {
    let g = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]);
    let err = g
        .rename(|id| {
            if id == "c" {
                Err(format!("{id} is out of scope"))
            } else {
                Ok(id.to_uppercase())
            }
        })
        .unwrap_err();
    assert_eq!(err, "c is out of scope");
}

#[test]
fn rename_calls_the_function_once_per_identifier() {
    let g = graph(&[("a", &["c"]), ("b", &["c"]), ("c", &[])]);
    let mut calls: Vec<String> = Vec::new();
    let renamed = g
        .rename(|id| {
            calls.push(id.to_string());
            Ok::<_, ()>(format!("n_{id}"))
        })
        .unwrap();
    calls.sort();
    assert_eq!(calls, vec!["a", "b", "c"]);
    assert_eq!(
        renamed.edge_set(),
        edges(&[("n_a", "n_c"), ("n_b", "n_c")])
    );
}

#[test]
fn collapse_truncates_paths_and_drops_internal_edges() {
    let g = graph(&[
        ("app/cmd", &["app/core", "lib/io"]),
        ("app/core", &["lib/io", "lib/fmt"]),
        ("lib/fmt", &[]),
        ("lib/io", &["lib/fmt"]),
    ]);
    let collapsed = g.collapse(NonZeroUsize::new(1).unwrap());
    assert_eq!(collapsed, graph(&[("app", &["lib"]), ("lib", &[])]));
}
