//! Find the edges that close cycles.
//!
//! A depth-first search starts from every source node in identifier order; an edge that
//! reaches a node still on the DFS stack closes a cycle. Nodes the sources never reach (they
//! sit on cycles with no way in) are handled by starting a new search from the smallest
//! unvisited identifier, repeatedly, until every node is visited. Self-loops are never part
//! of the returned set; the ranking pass ignores them on its own.

use crate::graphlib::{Graph, alg};
use std::collections::{BTreeMap, BTreeSet};

/// Edge indices (positions in [`Graph::edges`]) that close a cycle.
pub fn feedback_edges(g: &Graph) -> BTreeSet<usize> {
    let mut out_edges: BTreeMap<&str, Vec<(usize, &str)>> = BTreeMap::new();
    for (ix, (v, w)) in g.edges().enumerate() {
        out_edges.entry(v).or_default().push((ix, w));
    }

    fn dfs<'a>(
        v: &'a str,
        out_edges: &BTreeMap<&'a str, Vec<(usize, &'a str)>>,
        visited: &mut BTreeSet<&'a str>,
        stack: &mut BTreeSet<&'a str>,
        fas: &mut BTreeSet<usize>,
    ) {
        if !visited.insert(v) {
            return;
        }
        stack.insert(v);
        for &(ix, w) in out_edges.get(v).map(Vec::as_slice).unwrap_or(&[]) {
            if v == w {
                continue;
            }
            if stack.contains(w) {
                fas.insert(ix);
            } else {
                dfs(w, out_edges, visited, stack, fas);
            }
        }
        stack.remove(v);
    }

    let mut fas: BTreeSet<usize> = BTreeSet::new();
    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut stack: BTreeSet<&str> = BTreeSet::new();

    for v in alg::sources(g) {
        dfs(v, &out_edges, &mut visited, &mut stack, &mut fas);
    }
    // `nodes()` is in identifier order, so each restart picks the smallest unvisited node.
    for v in g.nodes() {
        if !visited.contains(v) {
            tracing::debug!(node = v, "no source reaches node; starting a search from it");
            dfs(v, &out_edges, &mut visited, &mut stack, &mut fas);
        }
    }
    fas
}
