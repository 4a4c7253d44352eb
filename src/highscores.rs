//! High score tracking
//!
//! Wraps a [`ScoreStore`] and absorbs every storage failure: a missing or unreadable
//! value reads as 0 and a failed write only costs persistence, never the session's
//! best score.

use crate::persistence::{MemoryStore, ScoreStore};

/// Best score seen, backed by a store
#[derive(Debug)]
pub struct HighScores<S: ScoreStore = MemoryStore> {
    store: S,
    best: u64,
}

impl<S: ScoreStore> HighScores<S> {
    /// Read the stored high score once
    pub fn open(store: S) -> Self {
        let best = match store.load() {
            Ok(Some(score)) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("High score unavailable ({}), using 0", e);
                0
            }
        };
        Self { store, best }
    }

    pub fn get(&self) -> u64 {
        self.best
    }

    /// Record `candidate` if it beats the best score. Returns true when it did.
    pub fn update(&mut self, candidate: u64) -> bool {
        if candidate <= self.best {
            return false;
        }
        self.best = candidate;
        if let Err(e) = self.store.save(candidate) {
            log::warn!("Failed to save high score {}: {}", candidate, e);
        } else {
            log::info!("New high score {}", candidate);
        }
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
