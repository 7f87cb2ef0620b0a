//! Persisted high score
//!
//! A single best score, monotonically non-decreasing across sessions.

use serde::{Deserialize, Serialize};

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::{KeyValueStore, read_int, write_int};

/// Best score achieved on this device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true if the best score improved.
    pub fn submit(&mut self, score: u32) -> bool {
        if self.qualifies(score) {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load from storage (0 when absent or malformed)
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let best = read_int(store, HIGH_SCORE_KEY);
        log::info!("Loaded high score: {}", best);
        Self { best }
    }

    /// Save to storage (best-effort)
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        write_int(store, HIGH_SCORE_KEY, self.best);
        log::info!("High score saved ({})", self.best);
    }
}
