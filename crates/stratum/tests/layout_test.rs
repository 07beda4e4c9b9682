use stratum::graphlib::{self, Graph, codec as graph_codec};
use stratum::{Error, LayoutOptions, RankDir, Waypoint, layout};

fn scenario() -> Graph {
    graph_codec::decode(r#"{"a":["b","c"],"b":["c"],"c":[]}"#).unwrap()
}

#[test]
fn layout_puts_dependencies_on_top_of_a_reversed_graph() {
    let l = layout(&scenario().reverse(), &LayoutOptions::default()).unwrap();
    assert_eq!(l.layer_of("c"), Some(0));
    assert_eq!(l.layer_of("b"), Some(1));
    assert_eq!(l.layer_of("a"), Some(2));
    assert_eq!(l.layers(), vec![vec!["c"], vec!["b"], vec!["a"]]);
}

#[test]
fn layout_reports_node_boxes_and_size() {
    let l = layout(&scenario().reverse(), &LayoutOptions::default()).unwrap();
    let a = l.node("a").unwrap();
    assert_eq!((a.x, a.y, a.width, a.height), (0.0, 240.0, 160.0, 40.0));
    assert_eq!((l.width, l.height), (200.0, 280.0));
    assert_eq!(l.rankdir, RankDir::TB);
    assert_eq!(l.version, stratum::LAYOUT_SCHEMA_VERSION);
}

#[test]
fn layout_routes_long_edges_through_waypoints() {
    let l = layout(&scenario().reverse(), &LayoutOptions::default()).unwrap();
    let long = l
        .edges
        .iter()
        .find(|e| e.source == "c" && e.target == "a")
        .unwrap();
    assert_eq!(
        long.points,
        vec![
            Waypoint { layer: 0, order: 0, x: 80.0, y: 20.0, is_virtual: false },
            Waypoint { layer: 1, order: 1, x: 200.0, y: 140.0, is_virtual: true },
            Waypoint { layer: 2, order: 0, x: 80.0, y: 260.0, is_virtual: false },
        ]
    );
    let short = l
        .edges
        .iter()
        .find(|e| e.source == "b" && e.target == "a")
        .unwrap();
    assert_eq!(short.points.len(), 2);
}

#[test]
fn layout_keeps_edges_in_graph_order() {
    let l = layout(&scenario(), &LayoutOptions::default()).unwrap();
    let pairs: Vec<(&str, &str)> = l
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(pairs, vec![("a", "b"), ("a", "c"), ("b", "c")]);
}

#[test]
fn layout_rejects_dangling_references() {
    let g = graph_codec::decode(r#"{"a":["z"]}"#).unwrap();
    match layout(&g, &LayoutOptions::default()) {
        Err(Error::Graph(graphlib::Error::DanglingReference { node, target })) => {
            assert_eq!((node.as_str(), target.as_str()), ("a", "z"));
        }
        other => panic!("expected dangling reference, got {other:?}"),
    }
}

#[test]
fn layout_rejects_negative_geometry() {
    let opts = LayoutOptions {
        nodesep: -1.0,
        ..Default::default()
    };
    let err = layout(&scenario(), &opts).unwrap_err();
    assert!(matches!(err, Error::BadInput { .. }));
}

#[test]
fn layout_handles_a_graph_made_only_of_cycles() {
    let g = graph_codec::decode(r#"{"a":["b"],"b":["c"],"c":["a"],"x":["y"],"y":["x"]}"#).unwrap();
    let l = layout(&g, &LayoutOptions::default()).unwrap();
    assert_eq!(l.layer_of("a"), Some(0));
    assert_eq!(l.layer_of("b"), Some(1));
    assert_eq!(l.layer_of("c"), Some(2));
    assert_eq!(l.layer_of("x"), Some(0));
    assert_eq!(l.layer_of("y"), Some(1));

    let back = l.edges.iter().find(|e| e.source == "c").unwrap();
    assert!(back.reversed);
    assert_eq!(back.points.first().map(|p| p.layer), Some(2));
    assert_eq!(back.points.last().map(|p| p.layer), Some(0));
    assert_eq!(back.points.len(), 3);
}

#[test]
fn layout_of_an_empty_graph_is_empty() {
    let l = layout(&Graph::new(), &LayoutOptions::default()).unwrap();
    assert!(l.nodes.is_empty());
    assert!(l.edges.is_empty());
    assert_eq!((l.width, l.height), (0.0, 0.0));
}

#[test]
fn layout_is_deterministic() {
    let g = graph_codec::decode(
        r#"{"app":["core","log","net"],"core":["log"],"log":[],"net":["core","log"]}"#,
    )
    .unwrap();
    let first = layout(&g, &LayoutOptions::default()).unwrap();
    let second = layout(&g.clone(), &LayoutOptions::default()).unwrap();
    assert_eq!(first, second);
}
