//! Axis-aligned rectangle.

use serde::{Deserialize, Serialize};

use crate::Vector;

/// An axis-aligned rectangle stored as a center position plus extents.
///
/// `position` is the reference position the grid uses to pick the owning cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Center of the rectangle.
    pub position: Vector,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    /// Create a rectangle centered on `position`.
    #[must_use]
    pub const fn new(position: Vector, width: f64, height: f64) -> Self {
        Self {
            position,
            width,
            height,
        }
    }

    /// Create a rectangle from two opposite corners, in any order.
    #[must_use]
    pub fn from_corners(a: Vector, b: Vector) -> Self {
        let min = Vector::new(a.x.min(b.x), a.y.min(b.y));
        let max = Vector::new(a.x.max(b.x), a.y.max(b.y));
        Self::new((min + max) * 0.5, max.x - min.x, max.y - min.y)
    }

    /// Corner with the smallest coordinates.
    #[must_use]
    pub fn min_point(&self) -> Vector {
        Vector::new(
            self.position.x - self.width / 2.0,
            self.position.y - self.height / 2.0,
        )
    }

    /// Corner with the largest coordinates.
    #[must_use]
    pub fn max_point(&self) -> Vector {
        Vector::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether the two rectangles share a region of positive area.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.area_of_overlap(other) > 0.0
    }

    /// Area of the region covered by both rectangles, `0.0` when disjoint.
    #[must_use]
    pub fn area_of_overlap(&self, other: &Self) -> f64 {
        let (a_min, a_max) = (self.min_point(), self.max_point());
        let (b_min, b_max) = (other.min_point(), other.max_point());

        let dx = a_max.x.min(b_max.x) - a_min.x.max(b_min.x);
        let dy = a_max.y.min(b_max.y) - a_min.y.max(b_min.y);

        if dx <= 0.0 || dy <= 0.0 {
            return 0.0;
        }

        dx * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        let rect = Rectangle::new(Vector::new(4.0, 4.0), 2.0, 6.0);

        assert_eq!(rect.min_point(), Vector::new(3.0, 1.0));
        assert_eq!(rect.max_point(), Vector::new(5.0, 7.0));
        assert_eq!(rect.area(), 12.0);
    }

    #[test]
    fn test_from_corners_normalizes() {
        let rect = Rectangle::from_corners(Vector::new(10.0, 0.0), Vector::new(0.0, 4.0));

        assert_eq!(rect.position, Vector::new(5.0, 2.0));
        assert_eq!(rect.width, 10.0);
        assert_eq!(rect.height, 4.0);
    }

    #[test]
    fn test_area_of_overlap() {
        let cell = Rectangle::new(Vector::new(16.0, 16.0), 32.0, 32.0);

        // Identical
        assert_eq!(cell.area_of_overlap(&cell), 1024.0);

        // Partial: quarter of the cell
        let corner = Rectangle::new(Vector::new(32.0, 32.0), 32.0, 32.0);
        assert_eq!(cell.area_of_overlap(&corner), 256.0);

        // Contained
        let small = Rectangle::new(Vector::new(8.0, 8.0), 2.0, 2.0);
        assert_eq!(cell.area_of_overlap(&small), 4.0);
        assert_eq!(small.area_of_overlap(&cell), 4.0);

        // Touching edges share no area
        let beside = Rectangle::new(Vector::new(48.0, 16.0), 32.0, 32.0);
        assert_eq!(cell.area_of_overlap(&beside), 0.0);
        assert!(!cell.intersects(&beside));

        // Disjoint
        let far = Rectangle::new(Vector::new(100.0, 100.0), 4.0, 4.0);
        assert_eq!(cell.area_of_overlap(&far), 0.0);
    }
}
