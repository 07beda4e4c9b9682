use stratum::graphlib::Graph;
use stratum::{LayerGraph, acyclic, normalize, order, rank};

fn graph(entries: &[(&str, &[&str])]) -> Graph {
    entries
        .iter()
        .map(|(v, ws)| (v.to_string(), ws.iter().map(|w| w.to_string()).collect()))
        .collect()
}

fn ordered(g: &Graph) -> LayerGraph {
    let layers = rank::longest_path(g, &acyclic::feedback_edges(g));
    let mut lg = normalize::run(g, &layers);
    order::order(&mut lg);
    lg
}

fn order_of(lg: &LayerGraph, id: &str) -> usize {
    lg.node(id).unwrap().order
}

#[test]
fn first_layer_is_sorted_by_identifier() {
    let lg = ordered(&graph(&[("c", &[]), ("a", &[]), ("b", &[])]));
    assert_eq!(order_of(&lg, "a"), 0);
    assert_eq!(order_of(&lg, "b"), 1);
    assert_eq!(order_of(&lg, "c"), 2);
}

#[test]
fn children_follow_the_order_of_their_parents() {
    // Without barycenters, "a1" < "z1" would put a1 first.
    let lg = ordered(&graph(&[
        ("p", &["z1"]),
        ("q", &["a1"]),
        ("a1", &[]),
        ("z1", &[]),
    ]));
    assert_eq!(order_of(&lg, "p"), 0);
    assert_eq!(order_of(&lg, "q"), 1);
    assert_eq!(order_of(&lg, "z1"), 0);
    assert_eq!(order_of(&lg, "a1"), 1);
    assert_eq!(order::cross_count(&lg), 0);
}

#[test]
fn equal_barycenters_break_ties_by_identifier() {
    let lg = ordered(&graph(&[("r", &["y", "x"]), ("x", &[]), ("y", &[])]));
    assert_eq!(order_of(&lg, "x"), 0);
    assert_eq!(order_of(&lg, "y"), 1);
}

#[test]
fn barycenter_averages_parent_positions() {
    let lg = ordered(&graph(&[
        ("a", &["m", "n"]),
        ("b", &["m"]),
        ("c", &["m", "k"]),
        ("k", &[]),
        ("m", &[]),
        ("n", &[]),
    ]));
    // a=0, b=1, c=2: n -> 0.0, m -> 1.0, k -> 2.0.
    assert_eq!(order_of(&lg, "n"), 0);
    assert_eq!(order_of(&lg, "m"), 1);
    assert_eq!(order_of(&lg, "k"), 2);

    let upper = order::upper_neighbors(&lg);
    let m = lg.node_slot("m").unwrap();
    assert_eq!(order::barycenter(&lg, &upper[m]), Some(1.0));
}

#[test]
fn virtual_slots_take_part_in_ordering() {
    let lg = ordered(&graph(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[])]).reverse());
    // Layer 1 holds b and the waypoint of c -> a; b wins the tie by identifier.
    assert_eq!(order_of(&lg, "b"), 0);
    let layers = lg.layers();
    assert_eq!(layers[1].len(), 2);
    assert!(lg.slots[layers[1][1]].is_virtual());
}
