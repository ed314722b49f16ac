//! Axis-aligned square overlap
//!
//! Every entity in the game is an axis-aligned square described by its
//! top-left corner and side length.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned square
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Square {
    /// Top-left corner
    pub pos: Vec2,
    /// Side length
    pub size: f32,
}

impl Square {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size,
        }
    }

    /// Square of side `size` centered on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        Self {
            pos: center - Vec2::splat(size / 2.0),
            size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Strict overlap test between two squares.
///
/// Touching edges do not count. A zero-size square therefore misses anything it
/// only touches, itself included, but still hits a square it sits strictly inside.
#[inline]
pub fn intersects(a: &Square, b: &Square) -> bool {
    a.pos.x < b.pos.x + b.size
        && a.pos.x + a.size > b.pos.x
        && a.pos.y < b.pos.y + b.size
        && a.pos.y + a.size > b.pos.y
}
