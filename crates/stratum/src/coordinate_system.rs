//! Rank direction transforms.
//!
//! Positioning always lays layers out top to bottom. Other directions are applied afterwards
//! by mirroring and/or swapping axes of every slot box.

use crate::position::Size;
use crate::{LayerGraph, RankDir};

pub fn adjust(lg: &mut LayerGraph, rankdir: RankDir, size: Size) -> Size {
    match rankdir {
        RankDir::TB => size,
        RankDir::BT => {
            reverse_y(lg, size.height);
            size
        }
        RankDir::LR => {
            swap_xy(lg);
            Size {
                width: size.height,
                height: size.width,
            }
        }
        RankDir::RL => {
            swap_xy(lg);
            reverse_x(lg, size.height);
            Size {
                width: size.height,
                height: size.width,
            }
        }
    }
}

fn reverse_y(lg: &mut LayerGraph, height: f64) {
    for slot in &mut lg.slots {
        slot.y = height - slot.y - slot.height;
    }
}

fn reverse_x(lg: &mut LayerGraph, width: f64) {
    for slot in &mut lg.slots {
        slot.x = width - slot.x - slot.width;
    }
}

fn swap_xy(lg: &mut LayerGraph) {
    for slot in &mut lg.slots {
        std::mem::swap(&mut slot.x, &mut slot.y);
        std::mem::swap(&mut slot.width, &mut slot.height);
    }
}
