//! Longest-path layering.
//!
//! A node's layer is the length of the longest path reaching it from a source, following only
//! edges outside the feedback set. Self-loops never constrain layers.

use crate::graphlib::Graph;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::collections::{BTreeMap, BTreeSet};

pub fn longest_path(g: &Graph, feedback: &BTreeSet<usize>) -> BTreeMap<String, usize> {
    let mut preds: HashMap<&str, Vec<&str>> = HashMap::default();
    for (ix, (v, w)) in g.edges().enumerate() {
        if v == w || feedback.contains(&ix) {
            continue;
        }
        preds.entry(w).or_default().push(v);
    }

    fn dfs<'a>(
        v: &'a str,
        preds: &HashMap<&'a str, Vec<&'a str>>,
        memo: &mut HashMap<&'a str, usize>,
        in_progress: &mut HashSet<&'a str>,
    ) -> usize {
        if let Some(&layer) = memo.get(v) {
            return layer;
        }
        in_progress.insert(v);
        let mut layer: usize = 0;
        for &u in preds.get(v).map(Vec::as_slice).unwrap_or(&[]) {
            // An edge from a node still being ranked closes a cycle the feedback set missed.
            if in_progress.contains(u) {
                continue;
            }
            layer = layer.max(dfs(u, preds, memo, in_progress) + 1);
        }
        in_progress.remove(v);
        memo.insert(v, layer);
        layer
    }

    let mut memo: HashMap<&str, usize> = HashMap::default();
    let mut in_progress: HashSet<&str> = HashSet::default();
    g.nodes()
        .map(|v| {
            let layer = dfs(v, &preds, &mut memo, &mut in_progress);
            (v.to_string(), layer)
        })
        .collect()
}

/// Edges (by index) whose target layer is not strictly below their source layer.
pub fn non_monotone_edges(g: &Graph, layers: &BTreeMap<String, usize>) -> Vec<usize> {
    g.edges()
        .enumerate()
        .filter(|(_, (v, w))| match (layers.get(*v), layers.get(*w)) {
            (Some(lv), Some(lw)) => lw <= lv,
            _ => true,
        })
        .map(|(ix, _)| ix)
        .collect()
}
