//! Collision detection
//!
//! The bird is treated as its bounding box (center ± radius). All three
//! fatal conditions are plain extent comparisons in screen space.

use super::state::{Bird, Pipe};

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict containment: points on the border are outside
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px > self.x && px < self.x + self.w && py > self.y && py < self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fatal {
    Ceiling,
    Ground,
    Pipe,
}

/// Bird top crossed y = 0
pub fn hits_ceiling(bird: &Bird) -> bool {
    bird.top() < 0.0
}

/// Bird bottom touches or crosses the ground surface. Fatal while playing,
/// and the landing test during the death fall.
pub fn hits_ground(bird: &Bird, ground_y: f32) -> bool {
    bird.bottom() >= ground_y
}

/// True iff the bird overlaps the pipe horizontally while any part of it is
/// outside the gap vertically
pub fn bird_hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    let overlaps_x = bird.right() > pipe.x && bird.left() < pipe.right();
    let outside_gap = bird.top() < pipe.top || bird.bottom() > pipe.bottom;
    overlaps_x && outside_gap
}
