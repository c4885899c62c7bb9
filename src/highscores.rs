//! Best score tracking
//!
//! Read once at startup, written only when a finished run beats it.
//! Storage faults never reach the game: a failed read counts as 0 and a
//! failed write keeps the new record in memory.

use crate::persistence::HighScoreStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    /// Load from the store, falling back to 0
    pub fn load(store: &dyn HighScoreStore) -> Self {
        let best = match store.read_high_score() {
            Ok(Some(best)) => {
                log::info!("Loaded high score {}", best);
                best
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(err) => {
                log::warn!("Failed to read high score, using 0: {}", err);
                0
            }
        };
        Self { best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// True if `score` would set a new record
    pub fn beats(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished run's score. Returns true on a new record.
    pub fn submit(&mut self, score: u32, store: &mut dyn HighScoreStore) -> bool {
        if !self.beats(score) {
            return false;
        }
        self.best = score;
        match store.write_high_score(score) {
            Ok(()) => log::info!("New high score {} saved", score),
            Err(err) => log::warn!("Failed to save high score {}: {}", score, err),
        }
        true
    }
}
