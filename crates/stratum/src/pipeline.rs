//! The layout entrypoint.

use crate::graphlib::Graph;
use crate::{
    Error, Layout, LayoutOptions, Result, acyclic, coordinate_system, normalize, order,
    position, rank,
};
use tracing::instrument;

/// Lays out `g`.
///
/// `g` must satisfy the closed-world invariant; a dangling edge is reported as
/// [`stratum_graphlib::Error::DanglingReference`]. Any other graph, cyclic or not, lays out.
#[instrument(skip_all, fields(nodes = g.node_count(), rankdir = opts.rankdir.as_str()))]
pub fn layout(g: &Graph, opts: &LayoutOptions) -> Result<Layout> {
    g.validate()?;
    check_options(opts)?;

    let feedback = acyclic::feedback_edges(g);
    if !feedback.is_empty() {
        tracing::warn!(
            cycle_edges = feedback.len(),
            "graph is cyclic; edges closing cycles are routed against the layer direction"
        );
    }

    let layers = rank::longest_path(g, &feedback);
    let mut lg = normalize::run(g, &layers);
    order::order(&mut lg);
    let size = position::position(&mut lg, opts);
    let size = coordinate_system::adjust(&mut lg, opts.rankdir, size);

    if tracing::enabled!(tracing::Level::DEBUG) {
        tracing::debug!(
            nodes = g.node_count(),
            edges = g.edge_count(),
            layers = lg.layer_count(),
            virtual_slots = normalize::virtual_count(&lg),
            crossings = order::cross_count(&lg),
            "computed layered layout"
        );
    }

    Ok(Layout::from_layer_graph(&lg, opts.rankdir, size))
}

fn check_options(opts: &LayoutOptions) -> Result<()> {
    let fields = [
        ("node_width", opts.node_width),
        ("node_height", opts.node_height),
        ("virtual_width", opts.virtual_width),
        ("nodesep", opts.nodesep),
        ("ranksep", opts.ranksep),
    ];
    for (name, value) in fields {
        if !(value.is_finite() && value >= 0.0) {
            return Err(Error::BadInput {
                context: "layout options".to_string(),
                message: format!("{name} must be a finite, non-negative number (got {value})"),
            });
        }
    }
    Ok(())
}
