//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Variable timestep driven by the host clock
//! - Seeded RNG only
//! - Entity collections keep spawn order

pub mod collision;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use score::ScoreLedger;
pub use spawn::{SpawnTimers, obstacle_interval, star_interval};
pub use state::{
    Craft, GameEvent, GamePhase, GameState, Obstacle, ScoreSubmission, Star, SubmitRejection,
};
pub use tick::{TickInput, tick};
