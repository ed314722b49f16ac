//! Square play area carved out of the viewport

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Square;

/// Gameplay bounds, fixed for the whole session.
///
/// The play area is the largest square centered in the viewport, split into
/// `grid_cells` × `grid_cells` cells of side `cell_unit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub min: Vec2,
    pub max: Vec2,
    pub cell_unit: f32,
    pub grid_cells: u32,
    /// Full viewport size (used for off-screen culling)
    pub viewport: Vec2,
}

impl PlayArea {
    /// Compute bounds from viewport dimensions
    pub fn from_viewport(width: f32, height: f32, grid_cells: u32) -> Self {
        let side = width.min(height);
        let (min, max) = if width < height {
            (
                Vec2::new(0.0, height / 2.0 - width / 2.0),
                Vec2::new(width, height / 2.0 + width / 2.0),
            )
        } else {
            (
                Vec2::new(width / 2.0 - height / 2.0, 0.0),
                Vec2::new(width / 2.0 + height / 2.0, height),
            )
        };
        Self {
            min,
            max,
            cell_unit: side / grid_cells as f32,
            grid_cells,
            viewport: Vec2::new(width, height),
        }
    }

    /// Side length of the (square) play area
    pub fn side(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Viewport center, where the player sits
    pub fn center(&self) -> Vec2 {
        self.viewport / 2.0
    }

    /// Offset along an edge of the given cell index
    pub fn cell_offset(&self, cell: u32) -> f32 {
        cell as f32 * self.cell_unit
    }

    /// Whether an entity still overlaps the viewport grown by its own size.
    ///
    /// Strict on every side, so an entity sitting exactly on the expanded
    /// boundary is dropped.
    pub fn retains(&self, entity: &Square) -> bool {
        let size = entity.size;
        entity.pos.x > -size
            && entity.pos.x < self.viewport.x + size
            && entity.pos.y > -size
            && entity.pos.y < self.viewport.y + size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_viewport() {
        let area = PlayArea::from_viewport(1200.0, 800.0, 20);
        assert_eq!(area.min, Vec2::new(200.0, 0.0));
        assert_eq!(area.max, Vec2::new(1000.0, 800.0));
        assert_eq!(area.cell_unit, 40.0);
        assert_eq!(area.side(), 800.0);
    }

    #[test]
    fn test_portrait_viewport() {
        let area = PlayArea::from_viewport(400.0, 1000.0, 20);
        assert_eq!(area.min, Vec2::new(0.0, 300.0));
        assert_eq!(area.max, Vec2::new(400.0, 700.0));
        assert_eq!(area.cell_unit, 20.0);
        assert_eq!(area.max.y - area.min.y, area.side());
    }

    #[test]
    fn test_retains_strict_bounds() {
        let area = PlayArea::from_viewport(800.0, 800.0, 20);
        assert!(area.retains(&Square::new(0.0, 835.0, 40.0)));
        assert!(!area.retains(&Square::new(0.0, 840.0, 40.0)));
        assert!(!area.retains(&Square::new(-40.0, 100.0, 40.0)));
        assert!(area.retains(&Square::new(-39.0, 100.0, 40.0)));
    }
}
