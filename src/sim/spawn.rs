//! Obstacle and star spawning
//!
//! Each kind has its own timer. Intervals shrink as the score grows, down to
//! a fixed floor.

use glam::Vec2;
use rand::Rng;

use super::state::{Obstacle, Star};
use crate::consts::*;

/// Seconds accumulated since the last spawn of each kind
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnTimers {
    pub obstacle: f32,
    pub star: f32,
}

impl SpawnTimers {
    /// Accumulate `dt`; true when an obstacle is due (timer resets)
    pub fn obstacle_due(&mut self, dt: f32, score: u32) -> bool {
        self.obstacle += dt;
        if self.obstacle > obstacle_interval(score) {
            self.obstacle = 0.0;
            true
        } else {
            false
        }
    }

    /// Accumulate `dt`; true when a star is due (timer resets)
    pub fn star_due(&mut self, dt: f32, score: u32) -> bool {
        self.star += dt;
        if self.star > star_interval(score) {
            self.star = 0.0;
            true
        } else {
            false
        }
    }
}

/// Seconds between obstacles at the given score
pub fn obstacle_interval(score: u32) -> f32 {
    (OBSTACLE_INTERVAL_BASE - score as f32 / OBSTACLE_INTERVAL_SCORE_DIVISOR)
        .max(OBSTACLE_INTERVAL_FLOOR)
}

/// Seconds between stars at the given score
pub fn star_interval(score: u32) -> f32 {
    (STAR_INTERVAL_BASE - score as f32 / STAR_INTERVAL_SCORE_DIVISOR).max(STAR_INTERVAL_FLOOR)
}

/// Random x in [0, field_width - size), or 0 when the entity doesn't fit
fn spawn_x(rng: &mut impl Rng, field_width: f32, size: f32) -> f32 {
    let max_x = field_width - size;
    if max_x > 0.0 {
        rng.random_range(0.0..max_x)
    } else {
        0.0
    }
}

/// A new obstacle just above the top edge
pub fn spawn_obstacle(rng: &mut impl Rng, field_width: f32) -> Obstacle {
    let size = rng.random_range(OBSTACLE_MIN_SIZE..OBSTACLE_MAX_SIZE);
    let x = spawn_x(rng, field_width, size);
    Obstacle {
        pos: Vec2::new(x, -size),
        size,
        speed: rng.random_range(OBSTACLE_MIN_SPEED..OBSTACLE_MAX_SPEED),
    }
}

/// A new star just above the top edge
pub fn spawn_star(rng: &mut impl Rng, field_width: f32) -> Star {
    let x = spawn_x(rng, field_width, STAR_SIZE);
    Star {
        pos: Vec2::new(x, -STAR_SIZE),
        size: STAR_SIZE,
        speed: rng.random_range(STAR_MIN_SPEED..STAR_MAX_SPEED),
    }
}
