//! Frame clock
//!
//! Turns the host's animation-frame timestamps (milliseconds) into simulation
//! deltas (seconds).

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `timestamp_ms` and return seconds since the previous frame.
    /// The first frame yields 0.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_timestamp {
            Some(last) => ((timestamp_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);
        dt
    }
}
