//! Player square and its four-way split

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Square;

/// How far apart split squares sit, toggled by power-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpreadMode {
    #[default]
    Near,
    Far,
}

impl SpreadMode {
    pub fn toggled(self) -> Self {
        match self {
            SpreadMode::Near => SpreadMode::Far,
            SpreadMode::Far => SpreadMode::Near,
        }
    }
}

/// The player: one merged square or four quadrant squares.
///
/// Only center, size, offset and the divided flag are stored; the active
/// squares are always derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerShape {
    /// Center shared by both representations
    pub center: Vec2,
    /// Side of the merged square
    pub size: f32,
    /// Distance from center to each quadrant square's center, per axis
    pub offset: f32,
    /// Four squares active instead of one
    pub divided: bool,
}

impl PlayerShape {
    pub fn new(center: Vec2, size: f32, offset: f32) -> Self {
        Self {
            center,
            size,
            offset,
            divided: false,
        }
    }

    /// The merged square
    pub fn merged_square(&self) -> Square {
        Square::centered(self.center, self.size)
    }

    /// The four quadrant squares: top-left, top-right, bottom-left, bottom-right
    pub fn split_squares(&self) -> [Square; 4] {
        let half = self.size / 2.0;
        let o = self.offset;
        [
            Square::centered(self.center + Vec2::new(-o, -o), half),
            Square::centered(self.center + Vec2::new(o, -o), half),
            Square::centered(self.center + Vec2::new(-o, o), half),
            Square::centered(self.center + Vec2::new(o, o), half),
        ]
    }

    /// Currently active squares
    pub fn squares(&self) -> Vec<Square> {
        if self.divided {
            self.split_squares().to_vec()
        } else {
            vec![self.merged_square()]
        }
    }

    /// Whether any active square overlaps `other`
    pub fn hits(&self, other: &Square) -> bool {
        if self.divided {
            self.split_squares()
                .iter()
                .any(|sq| super::intersects(sq, other))
        } else {
            super::intersects(&self.merged_square(), other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_layout() {
        let mut shape = PlayerShape::new(Vec2::new(400.0, 400.0), 75.0, 100.0);
        shape.divided = true;
        let squares = shape.split_squares();
        assert_eq!(squares[0].size, 37.5);
        assert_eq!(squares[0].center(), Vec2::new(300.0, 300.0));
        assert_eq!(squares[1].center(), Vec2::new(500.0, 300.0));
        assert_eq!(squares[2].center(), Vec2::new(300.0, 500.0));
        assert_eq!(squares[3].center(), Vec2::new(500.0, 500.0));
        assert_eq!(shape.squares().len(), 4);
    }

    #[test]
    fn test_split_leaves_center_open() {
        let mut shape = PlayerShape::new(Vec2::new(400.0, 400.0), 75.0, 100.0);
        let middle = Square::centered(Vec2::new(400.0, 400.0), 10.0);
        assert!(shape.hits(&middle));
        shape.divided = true;
        assert!(!shape.hits(&middle));
    }

    #[test]
    fn test_toggle_spread() {
        assert_eq!(SpreadMode::default(), SpreadMode::Near);
        assert_eq!(SpreadMode::Near.toggled(), SpreadMode::Far);
        assert_eq!(SpreadMode::Far.toggled(), SpreadMode::Near);
    }

    proptest! {
        #[test]
        fn prop_split_is_pure(cx in 0.0f32..2000.0, cy in 0.0f32..2000.0, size in 1.0f32..200.0, offset in 0.0f32..300.0) {
            let a = PlayerShape::new(Vec2::new(cx, cy), size, offset);
            let b = a.clone();
            prop_assert_eq!(a.split_squares(), b.split_squares());
            for sq in a.split_squares() {
                prop_assert!((sq.size - size / 2.0).abs() < f32::EPSILON);
            }
        }
    }
}
