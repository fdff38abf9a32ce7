//! Leaderboard display model
//!
//! Holds the latest list returned by the server and turns it into ranked
//! rows. The server keeps the top 10 sorted by score; the client trusts its
//! order.

use super::LeaderboardEntry;

/// Number of entries the server keeps
pub const MAX_ENTRIES: usize = 10;

/// Row shown when the board is empty
pub const EMPTY_PLACEHOLDER: &str = "No records yet.";

/// A rendered leaderboard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    /// 1-indexed rank
    pub rank: usize,
    pub player_name: String,
    /// Score with thousands separators
    pub score: String,
}

#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    /// Set once any list has arrived from the server
    loaded: bool,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            loaded: false,
        }
    }

    /// Swap in a fresh list from the server
    pub fn replace(&mut self, entries: Vec<LeaderboardEntry>) {
        log::info!("Leaderboard updated ({} entries)", entries.len());
        self.entries = entries;
        self.loaded = true;
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a score would make the board. An unloaded board says nothing.
    pub fn qualifies(&self, score: u64) -> bool {
        if !self.loaded || score == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Ranked rows in display order
    pub fn rows(&self) -> Vec<LeaderboardRow> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| LeaderboardRow {
                rank: i + 1,
                player_name: e.player_name.clone(),
                score: format_score(e.score),
            })
            .collect()
    }
}

/// Format a score with comma thousands separators (1280 -> "1,280")
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
