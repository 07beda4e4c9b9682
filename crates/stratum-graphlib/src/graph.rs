//! The dependency graph container.
//!
//! Nodes are kept in a `BTreeMap` so iteration (and therefore encoding, building, and layout)
//! is always lexicographic by identifier. Each node owns an ordered list of edge targets;
//! duplicates are allowed and order is preserved exactly as inserted.

use crate::{Error, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::convert::Infallible;
use std::fmt;
use std::num::NonZeroUsize;

pub mod alg;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: BTreeMap<String, Vec<String>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an adjacency map as-is. No well-formedness check is performed; see
    /// [`Graph::validate`].
    pub fn from_adjacency(adjacency: BTreeMap<String, Vec<String>>) -> Self {
        Self { adjacency }
    }

    pub fn into_adjacency(self) -> BTreeMap<String, Vec<String>> {
        self.adjacency
    }

    pub fn adjacency(&self) -> &BTreeMap<String, Vec<String>> {
        &self.adjacency
    }

    /// Adds `id` with no outgoing edges. Existing nodes keep their edges.
    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        self.adjacency.entry(id.into()).or_default();
        self
    }

    /// Replaces the outgoing edges of `id`, creating the node if needed. Targets are not
    /// created; a target missing from the node set is a dangling reference.
    pub fn set_edges(&mut self, id: impl Into<String>, targets: Vec<String>) -> &mut Self {
        self.adjacency.insert(id.into(), targets);
        self
    }

    /// Appends a single edge `v -> w`, creating `v` if needed.
    pub fn push_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.adjacency.entry(v.into()).or_default().push(w.into());
        self
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Outgoing edge targets of `id`, in stored order. Unknown nodes have no successors.
    pub fn successors(&self, id: &str) -> &[String] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every edge as `(source, target)`, sources in identifier order and targets in stored
    /// order. The position of an edge in this sequence is its stable edge index.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.adjacency
            .iter()
            .flat_map(|(v, ws)| ws.iter().map(move |w| (v.as_str(), w.as_str())))
    }

    /// The edges as a set, ignoring order and multiplicity.
    pub fn edge_set(&self) -> BTreeSet<(String, String)> {
        self.edges()
            .map(|(v, w)| (v.to_string(), w.to_string()))
            .collect()
    }

    /// Checks the closed-world invariant: every edge target is itself a node.
    ///
    /// The first offending edge (in edge-index order) is reported.
    pub fn validate(&self) -> Result<()> {
        match self.edges().find(|(_, w)| !self.has_node(w)) {
            Some((v, w)) => Err(Error::DanglingReference {
                node: v.to_string(),
                target: w.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Returns a new graph with every edge `a -> b` turned into `b -> a`.
    ///
    /// The node set is kept (and edge targets that were not nodes become nodes). Reversed
    /// edge lists are ordered by their original source identifier.
    pub fn reverse(&self) -> Graph {
        let mut adjacency: BTreeMap<String, Vec<String>> = self
            .adjacency
            .keys()
            .map(|v| (v.clone(), Vec::new()))
            .collect();
        for (v, w) in self.edges() {
            adjacency
                .entry(w.to_string())
                .or_default()
                .push(v.to_string());
        }
        Graph { adjacency }
    }

    /// Applies `f` to every node identifier and every edge target.
    ///
    /// `f` runs once per distinct identifier. Nodes that rename to the same identifier have
    /// their edge lists concatenated in source-identifier order; duplicate targets are kept.
    /// Renamed edge targets are always present as nodes in the result. The first error from
    /// `f` aborts the whole call.
    pub fn rename<F, E>(&self, mut f: F) -> std::result::Result<Graph, E>
    where
        F: FnMut(&str) -> std::result::Result<String, E>,
    {
        fn lookup<'a, F, E>(
            renamed: &mut BTreeMap<&'a str, String>,
            f: &mut F,
            id: &'a str,
        ) -> std::result::Result<String, E>
        where
            F: FnMut(&str) -> std::result::Result<String, E>,
        {
            if let Some(hit) = renamed.get(id) {
                return Ok(hit.clone());
            }
            let out = f(id)?;
            renamed.insert(id, out.clone());
            Ok(out)
        }

        let mut renamed: BTreeMap<&str, String> = BTreeMap::new();
        let mut adjacency: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut targets: BTreeSet<String> = BTreeSet::new();

        for (v, ws) in &self.adjacency {
            let nv = lookup(&mut renamed, &mut f, v)?;
            let mut mapped: Vec<String> = Vec::with_capacity(ws.len());
            for w in ws {
                let nw = lookup(&mut renamed, &mut f, w)?;
                targets.insert(nw.clone());
                mapped.push(nw);
            }
            adjacency.entry(nv).or_default().extend(mapped);
        }
        for w in targets {
            adjacency.entry(w).or_default();
        }

        Ok(Graph { adjacency })
    }

    /// Collapses `/`-separated identifiers to their first `depth` segments.
    ///
    /// Edges that become self-edges are dropped and each target is kept once per node,
    /// in first-seen order.
    pub fn collapse(&self, depth: NonZeroUsize) -> Graph {
        let renamed = match self.rename(|id| Ok::<_, Infallible>(truncate_path(id, depth))) {
            Ok(g) => g,
            Err(never) => match never {},
        };

        let adjacency = renamed
            .adjacency
            .into_iter()
            .map(|(v, ws)| {
                let mut seen: BTreeSet<String> = BTreeSet::new();
                let ws: Vec<String> = ws
                    .into_iter()
                    .filter(|w| *w != v && seen.insert(w.clone()))
                    .collect();
                (v, ws)
            })
            .collect();
        Graph { adjacency }
    }
}

fn truncate_path(id: &str, depth: NonZeroUsize) -> String {
    id.split('/')
        .take(depth.get())
        .collect::<Vec<_>>()
        .join("/")
}

impl Serialize for Graph {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.adjacency.len()))?;
        for (v, ws) in &self.adjacency {
            map.serialize_entry(v, ws)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Graph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AdjacencyVisitor;

        impl<'de> Visitor<'de> for AdjacencyVisitor {
            type Value = Graph;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping node identifiers to arrays of identifiers")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Graph, A::Error> {
                let mut adjacency: BTreeMap<String, Vec<String>> = BTreeMap::new();
                while let Some((v, ws)) = access.next_entry::<String, Vec<String>>()? {
                    if adjacency.contains_key(&v) {
                        return Err(serde::de::Error::custom(format_args!(
                            "duplicate node identifier `{v}`"
                        )));
                    }
                    adjacency.insert(v, ws);
                }
                Ok(Graph { adjacency })
            }
        }

        deserializer.deserialize_map(AdjacencyVisitor)
    }
}

impl FromIterator<(String, Vec<String>)> for Graph {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut g = Graph::new();
        for (v, ws) in iter {
            g.adjacency.entry(v).or_default().extend(ws);
        }
        g
    }
}
