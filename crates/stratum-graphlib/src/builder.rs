//! Building a [`Graph`] from a catalog of units.
//!
//! The builder works in one of two modes:
//!
//! - [`GraphBuilder::global`] takes every unit the catalog knows. The catalog is expected to be
//!   closed, so a reference outside it is a construction error.
//! - [`GraphBuilder::scoped`] takes a caller-chosen set of units. References leaving that set are
//!   dropped; the graph only describes edges within the scope.

use crate::{Error, Graph, Result};
use std::collections::{BTreeMap, BTreeSet};
use tracing::instrument;

/// Enumerates units and their raw (unfiltered) references.
pub trait UnitCatalog {
    /// Every unit in the catalog.
    fn units(&self) -> Vec<String>;

    /// The units that belong to the named scope.
    fn scope(&self, name: &str) -> Result<Vec<String>>;

    /// The references declared by `unit`, possibly pointing outside any scope.
    fn references(&self, unit: &str) -> Result<Vec<String>>;
}

/// An in-memory catalog, usually decoded from a unit manifest in the graph wire format.
///
/// Scopes are hierarchical: the scope `a/b` contains `a/b` itself and every unit below
/// `a/b/`.
#[derive(Debug, Clone, Default)]
pub struct ManifestCatalog {
    units: BTreeMap<String, Vec<String>>,
}

impl ManifestCatalog {
    pub fn new(units: BTreeMap<String, Vec<String>>) -> Self {
        Self { units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl From<Graph> for ManifestCatalog {
    fn from(manifest: Graph) -> Self {
        Self::new(manifest.into_adjacency())
    }
}

impl UnitCatalog for ManifestCatalog {
    fn units(&self) -> Vec<String> {
        self.units.keys().cloned().collect()
    }

    fn scope(&self, name: &str) -> Result<Vec<String>> {
        let prefix = format!("{}/", name.trim_end_matches('/'));
        let members: Vec<String> = self
            .units
            .keys()
            .filter(|unit| *unit == name || unit.starts_with(&prefix))
            .cloned()
            .collect();
        if members.is_empty() {
            return Err(Error::UnknownScope {
                scope: name.to_string(),
            });
        }
        Ok(members)
    }

    fn references(&self, unit: &str) -> Result<Vec<String>> {
        self.units
            .get(unit)
            .cloned()
            .ok_or_else(|| Error::UnknownUnit {
                unit: unit.to_string(),
            })
    }
}

#[derive(Debug, Clone)]
enum Selection {
    Global,
    Units(BTreeSet<String>),
}

pub struct GraphBuilder<'a, C: UnitCatalog + ?Sized> {
    catalog: &'a C,
    selection: Selection,
}

impl<'a, C: UnitCatalog + ?Sized> GraphBuilder<'a, C> {
    /// Builds over every unit in `catalog`.
    pub fn global(catalog: &'a C) -> Self {
        Self {
            catalog,
            selection: Selection::Global,
        }
    }

    /// Builds over the named units only; each one is looked up in `catalog` independently.
    pub fn scoped<I, S>(catalog: &'a C, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            catalog,
            selection: Selection::Units(units.into_iter().map(Into::into).collect()),
        }
    }

    #[instrument(skip_all)]
    pub fn build(&self) -> Result<Graph> {
        let global: BTreeSet<String>;
        let (units, scope) = match &self.selection {
            Selection::Global => {
                global = self.catalog.units().into_iter().collect();
                (&global, None)
            }
            Selection::Units(units) => (units, Some(units)),
        };

        let mut g = Graph::new();
        let mut filtered: usize = 0;
        for unit in units {
            let mut refs = self.catalog.references(unit)?;
            if let Some(scope) = scope {
                let before = refs.len();
                refs.retain(|r| scope.contains(r));
                filtered += before - refs.len();
            }
            refs.sort();
            refs.dedup();
            g.set_edges(unit.clone(), refs);
        }

        g.validate().map_err(|err| match err {
            Error::DanglingReference { node, target } => Error::Construction { node, target },
            other => other,
        })?;

        tracing::debug!(
            nodes = g.node_count(),
            edges = g.edge_count(),
            filtered,
            scoped = scope.is_some(),
            "built dependency graph"
        );
        Ok(g)
    }
}
