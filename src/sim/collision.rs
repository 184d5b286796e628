//! Axis-aligned collision tests
//!
//! Every collision in the three games is a box test: runner vs cactus,
//! ball vs paddle (with the paddle grown by the ball radius).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in canvas pixels, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Strict overlap; boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.w + 2.0 * margin,
            self.h + 2.0 * margin,
        )
    }

    /// Inclusive point test
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Circle vs box using the box grown by the radius (corners count as hits)
#[inline]
pub fn circle_touches_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    rect.expanded(radius).contains(center)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 20.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_circle_touches_expanded_rect() {
        let paddle = Rect::new(100.0, 100.0, 10.0, 80.0);
        // Just left of the paddle, within one radius
        assert!(circle_touches_rect(Vec2::new(95.0, 140.0), 6.0, &paddle));
        // Too far left
        assert!(!circle_touches_rect(Vec2::new(90.0, 140.0), 6.0, &paddle));
        // Above the top by less than the radius
        assert!(circle_touches_rect(Vec2::new(105.0, 96.0), 6.0, &paddle));
    }
}
