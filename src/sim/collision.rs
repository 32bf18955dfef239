//! Collision checks for an axis-aligned playfield
//!
//! Everything here is a predicate over the ball's current or next center
//! point. Response (velocity flips, scoring) lives in `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned rectangle, origin at the top-left (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// True when `p` lies strictly inside (edges excluded)
    #[inline]
    pub fn contains_strict(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }
}

/// Would the next center leave the horizontal band `[R, W - R]`?
#[inline]
pub fn crosses_side_wall(next_x: f32) -> bool {
    next_x > CANVAS_WIDTH - BALL_RADIUS || next_x < BALL_RADIUS
}

/// Would the next center go above the ceiling?
#[inline]
pub fn crosses_ceiling(next_y: f32) -> bool {
    next_y < BALL_RADIUS
}

/// Would the next center drop into the paddle band at the bottom?
#[inline]
pub fn crosses_paddle_band(next_y: f32) -> bool {
    next_y > CANVAS_HEIGHT - BALL_RADIUS - PADDLE_Y_OFFSET - PADDLE_HEIGHT
}

/// Is `x` over the paddle whose left edge is `paddle_x` (edges included)?
#[inline]
pub fn over_paddle(x: f32, paddle_x: f32) -> bool {
    x >= paddle_x && x <= paddle_x + PADDLE_WIDTH
}
