//! Collision primitives
//!
//! Box entities collide by axis-aligned rectangle overlap; meteors and
//! shooting stars collide by center distance against a radius.

use glam::Vec2;

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

/// Center-distance test between two points
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}

/// True when `pos` lies more than `margin` outside a `width` x `height` screen
#[inline]
pub fn outside_bounds(pos: Vec2, width: f32, height: f32, margin: f32) -> bool {
    pos.x < -margin || pos.x > width + margin || pos.y < -margin || pos.y > height + margin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(40.0, 40.0));
        let b = Rect::new(Vec2::new(30.0, 30.0), Vec2::new(5.0, 5.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_rect_touching_edges_miss() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(40.0, 40.0));
        let b = Rect::new(Vec2::new(40.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_within_radius() {
        assert!(within_radius(Vec2::ZERO, Vec2::new(3.0, 4.0), 5.1));
        assert!(!within_radius(Vec2::ZERO, Vec2::new(3.0, 4.0), 5.0));
    }

    #[test]
    fn test_outside_bounds() {
        assert!(!outside_bounds(Vec2::new(-50.0, 10.0), 800.0, 600.0, 100.0));
        assert!(outside_bounds(Vec2::new(-101.0, 10.0), 800.0, 600.0, 100.0));
        assert!(!outside_bounds(Vec2::new(10.0, 1.0), 800.0, 600.0, 0.0));
        assert!(outside_bounds(Vec2::new(801.0, 10.0), 800.0, 600.0, 0.0));
    }
}
