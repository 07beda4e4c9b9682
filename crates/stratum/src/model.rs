//! Layout wire types shared with the renderer.
//!
//! The schema is versioned by [`LAYOUT_SCHEMA_VERSION`]; renderers are built separately, so
//! any change to these types must bump it.

use crate::position::Size;
use crate::{LayerGraph, RankDir, SlotKind};
use serde::{Deserialize, Serialize};

pub const LAYOUT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub version: u32,
    pub rankdir: RankDir,
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

/// A real node. `x`/`y` is the top-left corner of its box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    pub layer: usize,
    pub order: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub source: String,
    pub target: String,
    pub reversed: bool,
    pub points: Vec<Waypoint>,
}

/// A routing point. `x`/`y` is the centre of the slot it passes through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub layer: usize,
    pub order: usize,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
}

impl Layout {
    pub fn from_layer_graph(lg: &LayerGraph, rankdir: RankDir, size: Size) -> Self {
        let mut nodes: Vec<LayoutNode> = lg
            .slots
            .iter()
            .filter_map(|slot| match &slot.kind {
                SlotKind::Node(id) => Some(LayoutNode {
                    id: id.clone(),
                    layer: slot.layer,
                    order: slot.order,
                    x: slot.x,
                    y: slot.y,
                    width: slot.width,
                    height: slot.height,
                }),
                SlotKind::Virtual { .. } => None,
            })
            .collect();
        nodes.sort_by_key(|n| (n.layer, n.order));

        let edges: Vec<LayoutEdge> = lg
            .edges
            .iter()
            .map(|edge| LayoutEdge {
                source: edge.source.clone(),
                target: edge.target.clone(),
                reversed: edge.reversed,
                points: edge
                    .chain
                    .iter()
                    .filter_map(|&ix| lg.slots.get(ix))
                    .map(|slot| {
                        let (x, y) = slot.center();
                        Waypoint {
                            layer: slot.layer,
                            order: slot.order,
                            x,
                            y,
                            is_virtual: slot.is_virtual(),
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            version: LAYOUT_SCHEMA_VERSION,
            rankdir,
            width: size.width,
            height: size.height,
            nodes,
            edges,
        }
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn layer_of(&self, id: &str) -> Option<usize> {
        self.node(id).map(|n| n.layer)
    }

    /// Node identifiers per layer, each layer in `order`.
    pub fn layers(&self) -> Vec<Vec<&str>> {
        let count = self.nodes.iter().map(|n| n.layer + 1).max().unwrap_or(0);
        let mut layers: Vec<Vec<&str>> = vec![Vec::new(); count];
        for n in &self.nodes {
            layers[n.layer].push(n.id.as_str());
        }
        layers
    }
}
