//! Structural queries over a [`Graph`].

use super::Graph;
use std::collections::{BTreeMap, BTreeSet};

/// Nodes with no incoming edges. Self-loops do not count as incoming edges.
pub fn sources(g: &Graph) -> Vec<&str> {
    let mut has_incoming: BTreeSet<&str> = BTreeSet::new();
    for (v, w) in g.edges() {
        if v != w {
            has_incoming.insert(w);
        }
    }
    g.nodes().filter(|v| !has_incoming.contains(v)).collect()
}

/// Incoming neighbours of every node, each list in edge-index order (duplicates kept).
pub fn predecessors(g: &Graph) -> BTreeMap<&str, Vec<&str>> {
    let mut out: BTreeMap<&str, Vec<&str>> = g.nodes().map(|v| (v, Vec::new())).collect();
    for (v, w) in g.edges() {
        out.entry(w).or_default().push(v);
    }
    out
}

pub fn has_cycle(g: &Graph) -> bool {
    !find_cycles(g).is_empty()
}

/// Strongly connected components with more than one node, plus nodes with a self-loop.
///
/// Members are sorted by identifier and cycles by their first member.
pub fn find_cycles(g: &Graph) -> Vec<Vec<String>> {
    struct Tarjan<'a> {
        g: &'a Graph,
        index: usize,
        stack: Vec<&'a str>,
        on_stack: BTreeSet<&'a str>,
        indices: BTreeMap<&'a str, usize>,
        lowlink: BTreeMap<&'a str, usize>,
        sccs: Vec<Vec<&'a str>>,
    }

    impl<'a> Tarjan<'a> {
        fn strongconnect(&mut self, v: &'a str) {
            self.indices.insert(v, self.index);
            self.lowlink.insert(v, self.index);
            self.index += 1;
            self.stack.push(v);
            self.on_stack.insert(v);

            let g = self.g;
            for w in g.successors(v) {
                let w = w.as_str();
                if !g.has_node(w) {
                    continue;
                }
                if !self.indices.contains_key(w) {
                    self.strongconnect(w);
                    let (Some(v_low), Some(w_low)) =
                        (self.lowlink.get(v).copied(), self.lowlink.get(w).copied())
                    else {
                        debug_assert!(false, "tarjan lowlink missing");
                        continue;
                    };
                    self.lowlink.insert(v, v_low.min(w_low));
                } else if self.on_stack.contains(w) {
                    let (Some(v_low), Some(w_idx)) =
                        (self.lowlink.get(v).copied(), self.indices.get(w).copied())
                    else {
                        debug_assert!(false, "tarjan index missing");
                        continue;
                    };
                    self.lowlink.insert(v, v_low.min(w_idx));
                }
            }

            if self.lowlink.get(v) != self.indices.get(v) {
                return;
            }
            let mut scc: Vec<&'a str> = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack.remove(w);
                scc.push(w);
                if w == v {
                    break;
                }
            }
            self.sccs.push(scc);
        }
    }

    let mut tarjan = Tarjan {
        g,
        index: 0,
        stack: Vec::new(),
        on_stack: BTreeSet::new(),
        indices: BTreeMap::new(),
        lowlink: BTreeMap::new(),
        sccs: Vec::new(),
    };

    for v in g.nodes() {
        if !tarjan.indices.contains_key(v) {
            tarjan.strongconnect(v);
        }
    }

    let mut cycles: Vec<Vec<String>> = tarjan
        .sccs
        .into_iter()
        .filter(|scc| match scc.as_slice() {
            [v] => g.successors(v).iter().any(|w| w == v),
            _ => true,
        })
        .map(|scc| {
            let mut scc: Vec<String> = scc.into_iter().map(str::to_string).collect();
            scc.sort();
            scc
        })
        .collect();
    cycles.sort();
    cycles
}
