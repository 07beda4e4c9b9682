//! Split long edges into chains of rank-adjacent segments.
//!
//! An edge spanning more than one layer gets one virtual slot in every layer strictly between
//! its endpoints. Edges that point against the layer direction are chained from the upper
//! endpoint down and then flipped, so every chain still reads source to target.

use crate::graphlib::Graph;
use crate::{LayerEdge, LayerGraph};
use std::collections::BTreeMap;

pub fn run(g: &Graph, layers: &BTreeMap<String, usize>) -> LayerGraph {
    let mut lg = LayerGraph::new();
    for v in g.nodes() {
        lg.add_node(v, layers.get(v).copied().unwrap_or(0));
    }

    for (ix, (v, w)) in g.edges().enumerate() {
        let (Some(s), Some(t)) = (lg.node_slot(v), lg.node_slot(w)) else {
            debug_assert!(false, "edge endpoints are validated before layout");
            continue;
        };
        let s_layer = lg.slots[s].layer;
        let t_layer = lg.slots[t].layer;
        let reversed = t_layer < s_layer;
        let (upper, lower) = if reversed { (t, s) } else { (s, t) };
        let (upper_layer, lower_layer) = if reversed {
            (t_layer, s_layer)
        } else {
            (s_layer, t_layer)
        };

        let mut chain: Vec<usize> = vec![upper];
        for layer in upper_layer + 1..lower_layer {
            chain.push(lg.add_virtual(ix, layer));
        }
        chain.push(lower);
        if reversed {
            chain.reverse();
        }

        lg.edges.push(LayerEdge {
            source: v.to_string(),
            target: w.to_string(),
            reversed,
            chain,
        });
    }
    lg
}

/// Number of virtual slots in `lg`.
pub fn virtual_count(lg: &LayerGraph) -> usize {
    lg.slots.iter().filter(|s| s.is_virtual()).count()
}
