//! MaziSpace - A space runner arcade game
//!
//! Core modules:
//! - `sim`: Simulation (spawning, motion, collisions, score, game state)
//! - `renderer`: 2D drawing of the world onto a `Surface`
//! - `platform`: Browser/native platform abstraction (clock, input, storage)
//! - `leaderboard`: HTTP leaderboard client and display model
//! - `settings`: Persisted player preferences

pub mod leaderboard;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use leaderboard::{Leaderboard, LeaderboardClient, LeaderboardEntry, LeaderboardError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions (the canvas size in index.html)
    pub const FIELD_WIDTH: f32 = 480.0;
    pub const FIELD_HEIGHT: f32 = 640.0;

    /// Craft geometry
    pub const CRAFT_WIDTH: f32 = 46.0;
    pub const CRAFT_HEIGHT: f32 = 58.0;
    /// Distance from the craft's top edge to the bottom of the field
    pub const CRAFT_BOTTOM_OFFSET: f32 = 80.0;
    /// Horizontal speed (pixels/s)
    pub const CRAFT_SPEED: f32 = 260.0;

    /// Obstacle spawn interval: max(floor, base - score / divisor) seconds
    pub const OBSTACLE_INTERVAL_BASE: f32 = 1.6;
    pub const OBSTACLE_INTERVAL_FLOOR: f32 = 0.6;
    pub const OBSTACLE_INTERVAL_SCORE_DIVISOR: f32 = 500.0;
    /// Obstacle side length range (pixels)
    pub const OBSTACLE_MIN_SIZE: f32 = 36.0;
    pub const OBSTACLE_MAX_SIZE: f32 = 66.0;
    /// Obstacle fall speed range (pixels/s)
    pub const OBSTACLE_MIN_SPEED: f32 = 120.0;
    pub const OBSTACLE_MAX_SPEED: f32 = 200.0;
    /// Obstacles are dropped once this far below the field
    pub const OBSTACLE_PRUNE_MARGIN: f32 = 60.0;

    /// Star spawn interval: max(floor, base - score / divisor) seconds
    pub const STAR_INTERVAL_BASE: f32 = 2.2;
    pub const STAR_INTERVAL_FLOOR: f32 = 0.9;
    pub const STAR_INTERVAL_SCORE_DIVISOR: f32 = 400.0;
    pub const STAR_SIZE: f32 = 16.0;
    /// Star fall speed range (pixels/s)
    pub const STAR_MIN_SPEED: f32 = 80.0;
    pub const STAR_MAX_SPEED: f32 = 140.0;

    /// Points awarded per collected star
    pub const STAR_SCORE: u32 = 25;

    /// Longest pilot name the leaderboard server accepts
    pub const MAX_PLAYER_NAME_CHARS: usize = 32;

    /// Leaderboard endpoint, relative to the page origin
    pub const LEADERBOARD_PATH: &str = "/api/leaderboard";
}
