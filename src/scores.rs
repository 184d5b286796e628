//! Score tracking with a persisted best
//!
//! Each game keeps one integer in storage under its own key (`pongBest`,
//! `jumperBest`, `snakeBest`). It is read once when the scoreboard is built
//! and written every time the best improves.

use crate::persistence::{KeyValueStore, MemoryStore};

/// Current, last-round and best score for one game
pub struct Scoreboard {
    key: String,
    current: u64,
    last: u64,
    best: u64,
    /// Best as of the last round end, for telling a record from a tie
    previous_best: u64,
    store: Box<dyn KeyValueStore>,
}

impl Scoreboard {
    /// Read the best score from `store` (missing or unreadable means 0)
    pub fn load(key: &str, store: Box<dyn KeyValueStore>) -> Self {
        let best = store.get(key).map(|raw| parse_score(&raw)).unwrap_or(0);
        log::info!("Loaded {} = {}", key, best);
        Self {
            key: key.to_string(),
            current: 0,
            last: 0,
            best,
            previous_best: best,
            store,
        }
    }

    /// Scoreboard backed by a throwaway in-memory store
    pub fn in_memory(key: &str) -> Self {
        Self::load(key, Box::new(MemoryStore::new()))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    /// Final score of the most recent round
    pub fn last(&self) -> u64 {
        self.last
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Update the displayed score, raising (and persisting) the best if beaten
    pub fn set_score(&mut self, value: u64) {
        self.current = value;
        if value > self.best {
            self.set_best(value);
        }
    }

    /// Freeze the current score as the round result. Returns true when the
    /// round beat every earlier round.
    pub fn record_round_end(&mut self) -> bool {
        self.last = self.current;
        if self.last > self.best {
            self.set_best(self.last);
        }
        let beat = self.last > self.previous_best;
        self.previous_best = self.best;
        beat
    }

    fn set_best(&mut self, value: u64) {
        self.best = value;
        if let Err(e) = self.store.set(&self.key, &value.to_string()) {
            log::warn!("Could not persist {}: {}", self.key, e);
        }
    }
}

/// Stored values are plain decimal strings; tolerate a stray fraction
fn parse_score(raw: &str) -> u64 {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u64>() {
        return v;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v.floor() as u64,
        _ => 0,
    }
}
