//! Working representation shared by the layout passes.
//!
//! Every real node and every virtual waypoint of a long edge occupies one [`Slot`]. Each
//! original edge keeps the chain of slots it passes through, from source to target.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotKind {
    Node(String),
    /// A waypoint of the edge with this index (see `Graph::edges`).
    Virtual { edge: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub kind: SlotKind,
    pub layer: usize,
    pub order: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Slot {
    fn new(kind: SlotKind, layer: usize) -> Self {
        Self {
            kind,
            layer,
            order: 0,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self.kind, SlotKind::Virtual { .. })
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerEdge {
    pub source: String,
    pub target: String,
    /// The edge runs against the layer direction (it closed a cycle).
    pub reversed: bool,
    /// Slot ids from source to target, endpoints included.
    pub chain: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerGraph {
    pub slots: Vec<Slot>,
    pub edges: Vec<LayerEdge>,
    node_index: BTreeMap<String, usize>,
}

impl LayerGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: impl Into<String>, layer: usize) -> usize {
        let id = id.into();
        if let Some(&ix) = self.node_index.get(&id) {
            return ix;
        }
        let ix = self.slots.len();
        self.slots.push(Slot::new(SlotKind::Node(id.clone()), layer));
        self.node_index.insert(id, ix);
        ix
    }

    pub fn add_virtual(&mut self, edge: usize, layer: usize) -> usize {
        let ix = self.slots.len();
        self.slots.push(Slot::new(SlotKind::Virtual { edge }, layer));
        ix
    }

    pub fn node_slot(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&Slot> {
        self.node_slot(id).and_then(|ix| self.slots.get(ix))
    }

    pub fn layer_count(&self) -> usize {
        self.slots.iter().map(|s| s.layer + 1).max().unwrap_or(0)
    }

    /// Slot ids grouped by layer, each layer sorted by `order`.
    pub fn layers(&self) -> Vec<Vec<usize>> {
        let mut layers: Vec<Vec<usize>> = vec![Vec::new(); self.layer_count()];
        for (ix, slot) in self.slots.iter().enumerate() {
            layers[slot.layer].push(ix);
        }
        for layer in &mut layers {
            layer.sort_by_key(|&ix| self.slots[ix].order);
        }
        layers
    }

    /// Deterministic tie-breaker: real nodes by identifier, waypoints by the identifier of
    /// their edge's source and then the edge index.
    pub fn tie_key(&self, slot: usize) -> (&str, usize) {
        match &self.slots[slot].kind {
            SlotKind::Node(id) => (id.as_str(), 0),
            SlotKind::Virtual { edge } => {
                let source = self.edges.get(*edge).map(|e| e.source.as_str()).unwrap_or("");
                (source, edge + 1)
            }
        }
    }
}
