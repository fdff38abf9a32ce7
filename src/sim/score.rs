//! Score ledger
//!
//! Score only ever grows within a run; the best score survives restarts.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    score: u32,
    best: u32,
}

impl ScoreLedger {
    /// Create a ledger with a best score carried over from a previous session
    pub fn with_best(best: u32) -> Self {
        Self { score: 0, best }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Add points to the current run. Returns true if this set a new best.
    pub fn increment(&mut self, amount: u32) -> bool {
        self.score = self.score.saturating_add(amount);
        if self.score > self.best {
            self.best = self.score;
            true
        } else {
            false
        }
    }

    /// Start a new run (best is kept)
    pub fn reset_run(&mut self) {
        self.score = 0;
    }
}
