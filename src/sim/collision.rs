//! Axis-aligned bounding box collision
//!
//! Every entity in the field is tested as a rectangle: the craft's triangle,
//! the round obstacles and the stars all use their bounding boxes.

use glam::Vec2;

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Open-interval overlap test: rectangles that only share an edge do not
    /// overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}
