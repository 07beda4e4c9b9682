//! Layered layout for module dependency graphs.
//!
//! The pipeline follows the classic layered-drawing passes, simplified for determinism:
//! break cycles ([`acyclic`]), assign longest-path layers ([`rank`]), split long edges into
//! virtual waypoints ([`normalize`]), order each layer once by barycenter ([`order`]), and
//! assign coordinates ([`position`], [`coordinate_system`]). [`layout`] runs all of them.

pub use stratum_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod acyclic;
pub mod codec;
pub mod coordinate_system;
mod error;
pub mod layer_graph;
pub mod model;
pub mod normalize;
mod options;
pub mod order;
mod pipeline;
pub mod position;
pub mod rank;

pub use error::{Error, Result};
pub use layer_graph::{LayerEdge, LayerGraph, Slot, SlotKind};
pub use model::{LAYOUT_SCHEMA_VERSION, Layout, LayoutEdge, LayoutNode, Waypoint};
pub use options::{LayoutOptions, RankDir};
pub use pipeline::layout;
