//! Coordinate assignment for a top-to-bottom drawing.
//!
//! Each slot's `x` is the running width of the slots before it in its layer (slot widths plus
//! `nodesep` between neighbours). Each slot's `y` is `layer * (node_height + ranksep)`.
//! Coordinates are the top-left corner of the slot's box.

use crate::{LayerGraph, LayoutOptions, SlotKind};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

pub fn position(lg: &mut LayerGraph, opts: &LayoutOptions) -> Size {
    let rank_step = opts.node_height + opts.ranksep;
    let mut width: f64 = 0.0;

    for layer in lg.layers() {
        let mut x_cursor: f64 = 0.0;
        let mut layer_width: f64 = 0.0;
        for ix in layer {
            let slot = &mut lg.slots[ix];
            slot.width = match slot.kind {
                SlotKind::Node(_) => opts.node_width,
                SlotKind::Virtual { .. } => opts.virtual_width,
            };
            slot.height = opts.node_height;
            slot.x = x_cursor;
            slot.y = slot.layer as f64 * rank_step;
            layer_width = x_cursor + slot.width;
            x_cursor += slot.width + opts.nodesep;
        }
        width = width.max(layer_width);
    }

    let layers = lg.layer_count();
    let height = if layers == 0 {
        0.0
    } else {
        layers as f64 * rank_step - opts.ranksep
    };
    Size { width, height }
}
