//! Player settings
//!
//! Persisted in LocalStorage so the pilot name and best score survive a page
//! reload.

use serde::{Deserialize, Serialize};

use crate::platform::storage;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Last name used for a successful leaderboard submission
    #[serde(default)]
    pub player_name: String,
    /// Best score across sessions
    #[serde(default)]
    pub best_score: u32,
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "mazi_space_settings";

    /// Raise the stored best score. Returns true if it changed.
    pub fn record_best(&mut self, score: u32) -> bool {
        if score > self.best_score {
            self.best_score = score;
            true
        } else {
            false
        }
    }

    /// Remember the pilot name. Returns true if it changed.
    pub fn remember_player(&mut self, name: &str) -> bool {
        if self.player_name != name {
            self.player_name = name.to_string();
            true
        } else {
            false
        }
    }

    /// Parse stored JSON, falling back to defaults on anything unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from storage
    pub fn load() -> Self {
        match storage::load(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to storage
    pub fn save(&self) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage::save(Self::STORAGE_KEY, &json) {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::error!("Failed to serialize settings: {}", e),
        }
    }
}
