//! Best-score tracking
//!
//! Persisted as a plain decimal string so it stays readable in the browser's
//! storage inspector.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Returns true (and updates) when `score` beats the stored best
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load from the store; a missing or unreadable value means 0
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u32>() {
                Ok(best) => {
                    log::info!("Loaded high score {}", best);
                    Self { best }
                }
                Err(_) => {
                    log::warn!("Ignoring malformed high score {:?}", raw);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read high score: {e}");
                Self::default()
            }
        }
    }

    /// Persist; failures are logged and otherwise ignored
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match store.set(Self::STORAGE_KEY, &self.best.to_string()) {
            Ok(()) => log::info!("High score saved ({})", self.best),
            Err(e) => log::warn!("Could not save high score: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;
    use crate::platform::storage::BrokenStore;

    #[test]
    fn test_record_only_on_improvement() {
        let mut hs = HighScore::new(10);
        assert!(!hs.record(5));
        assert!(!hs.record(10));
        assert_eq!(hs.best, 10);
        assert!(hs.record(11));
        assert_eq!(hs.best, 11);
    }

    #[test]
    fn test_load_absent_is_zero() {
        assert_eq!(HighScore::load(&MemoryStore::new()).best, 0);
    }

    #[test]
    fn test_load_parses_value() {
        let store = MemoryStore::new().with_entry("highScore", "42");
        assert_eq!(HighScore::load(&store).best, 42);
    }

    #[test]
    fn test_load_malformed_is_zero() {
        let store = MemoryStore::new().with_entry("highScore", "lots");
        assert_eq!(HighScore::load(&store).best, 0);
        let store = MemoryStore::new().with_entry("highScore", "-3");
        assert_eq!(HighScore::load(&store).best, 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        HighScore::new(17).save(&mut store);
        assert_eq!(store.get("highScore").unwrap().as_deref(), Some("17"));
        assert_eq!(HighScore::load(&store), HighScore::new(17));
    }

    #[test]
    fn test_broken_store_degrades_gracefully() {
        let mut store = BrokenStore;
        assert_eq!(HighScore::load(&store).best, 0);
        HighScore::new(3).save(&mut store);
    }
}
