//! Per-game tuning
//!
//! Persisted as JSON under its own storage key. Every field has a default,
//! so partial or older documents still load.

use serde::{Deserialize, Serialize};

use crate::games::jumper::JumperTuning;
use crate::games::pong::PongTuning;
use crate::games::snake::SnakeTuning;
use crate::persistence::{KeyValueStore, PersistError};

/// Tuning for all three games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pong: PongTuning,
    pub jumper: JumperTuning,
    pub snake: SnakeTuning,
    /// Fixed RNG seed for reproducible sessions; time-seeded when absent
    pub seed: Option<u64>,
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "pocket_arcade_settings";

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from `store`, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring stored settings: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), PersistError> {
        store.set(Self::STORAGE_KEY, &self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_match_canonical_constants() {
        let s = Settings::default();
        assert_eq!(s.pong.opponent_reaction, 0.12);
        assert_eq!(s.jumper.max_hold, 0.08);
        assert_eq!(s.snake.moves_per_second, 8.0);
        assert_eq!(s.seed, None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"snake": {"moves_per_second": 10.0}, "seed": 9}"#)
            .expect("valid settings");
        assert_eq!(s.snake.moves_per_second, 10.0);
        assert_eq!(s.snake.min_cell, 22.0);
        assert_eq!(s.pong, PongTuning::default());
        assert_eq!(s.seed, Some(9));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(PersistError::Codec(_))
        ));
    }

    #[test]
    fn test_load_falls_back_on_garbage() {
        let store = MemoryStore::new().with_entry(Settings::STORAGE_KEY, "][");
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.jumper.accel = 14.0;
        settings.save(&mut store).expect("memory store accepts writes");
        assert_eq!(Settings::load(&store).jumper.accel, 14.0);
    }

    #[test]
    fn test_save_reports_write_failure() {
        let mut store = MemoryStore::failing();
        assert!(Settings::default().save(&mut store).is_err());
    }
}
