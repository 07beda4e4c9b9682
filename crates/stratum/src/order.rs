//! Within-layer ordering.
//!
//! One top-down pass: layer 0 is sorted by identifier, and every later layer by the
//! barycenter (mean `order`) of each slot's neighbours in the layer above, ties broken by
//! [`LayerGraph::tie_key`]. Slots with no upper neighbour sort after those with one. The
//! pass is not iterated; crossing counts are best-effort.

use crate::LayerGraph;
use std::cmp::Ordering;

/// Upper neighbours of every slot: the slots one layer above it joined by a chain segment.
pub fn upper_neighbors(lg: &LayerGraph) -> Vec<Vec<usize>> {
    let mut upper: Vec<Vec<usize>> = vec![Vec::new(); lg.slots.len()];
    for edge in &lg.edges {
        for pair in edge.chain.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (la, lb) = (lg.slots[a].layer, lg.slots[b].layer);
            if la + 1 == lb {
                upper[b].push(a);
            } else if lb + 1 == la {
                upper[a].push(b);
            }
        }
    }
    upper
}

pub fn barycenter(lg: &LayerGraph, upper: &[usize]) -> Option<f64> {
    if upper.is_empty() {
        return None;
    }
    let sum: f64 = upper.iter().map(|&u| lg.slots[u].order as f64).sum();
    Some(sum / upper.len() as f64)
}

pub fn order(lg: &mut LayerGraph) {
    let upper = upper_neighbors(lg);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); lg.layer_count()];
    for (ix, slot) in lg.slots.iter().enumerate() {
        layers[slot.layer].push(ix);
    }

    for layer in layers {
        let mut keyed: Vec<(usize, Option<f64>)> = layer
            .into_iter()
            .map(|ix| (ix, barycenter(lg, &upper[ix])))
            .collect();
        keyed.sort_by(|(a, ba), (b, bb)| {
            compare_barycenters(*ba, *bb).then_with(|| lg.tie_key(*a).cmp(&lg.tie_key(*b)))
        });
        for (order, (ix, _)) in keyed.into_iter().enumerate() {
            lg.slots[ix].order = order;
        }
    }
}

fn compare_barycenters(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Number of crossings between chain segments of adjacent layers.
pub fn cross_count(lg: &LayerGraph) -> usize {
    let mut segments: Vec<(usize, usize, usize)> = Vec::new();
    for edge in &lg.edges {
        for pair in edge.chain.windows(2) {
            let (a, b) = (&lg.slots[pair[0]], &lg.slots[pair[1]]);
            if a.layer + 1 == b.layer {
                segments.push((a.layer, a.order, b.order));
            } else if b.layer + 1 == a.layer {
                segments.push((b.layer, b.order, a.order));
            }
        }
    }

    let mut crossings: usize = 0;
    for (i, &(layer, u1, l1)) in segments.iter().enumerate() {
        for &(other_layer, u2, l2) in &segments[i + 1..] {
            if layer != other_layer {
                continue;
            }
            if (u1 < u2 && l1 > l2) || (u1 > u2 && l1 < l2) {
                crossings += 1;
            }
        }
    }
    crossings
}
