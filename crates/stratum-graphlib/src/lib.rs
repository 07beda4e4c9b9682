//! Dependency graph APIs used by `stratum`.
//!
//! A [`Graph`] maps every unit (module) name to the ordered list of units it references.
//! [`GraphBuilder`] assembles one from a [`UnitCatalog`], and [`codec`] owns the JSON wire form
//! exchanged between the build and layout stages.

pub mod builder;
pub mod codec;
mod error;
pub mod graph;

pub use builder::{GraphBuilder, ManifestCatalog, UnitCatalog};
pub use error::{Error, Result};
pub use graph::{Graph, alg};
