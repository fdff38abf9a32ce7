//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (frame timestamps to delta seconds)
//! - Input events (held arrow keys)
//! - Storage (LocalStorage on web)

pub mod clock;
pub mod input;
pub mod storage;

pub use clock::FrameClock;
pub use input::InputLatch;
