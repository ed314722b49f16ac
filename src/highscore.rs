//! High score persistence
//!
//! A single integer under one LocalStorage key. A missing or unreadable value
//! counts as 0, never as an error.

use crate::consts::HIGH_SCORE_KEY;

/// Where the high score lives between sessions
pub trait HighScoreStore {
    /// Stored high score, 0 when absent
    fn load_high_score(&self) -> u64;
    fn save_high_score(&mut self, score: u64);
}

/// Parse a stored value, treating anything malformed as 0
pub fn parse_high_score(raw: &str) -> u64 {
    let trimmed = raw.trim();
    match trimmed.parse::<u64>() {
        Ok(score) => score,
        // Older builds may have written a float
        Err(_) => match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => v as u64,
            _ => {
                log::warn!("Ignoring malformed {} value {:?}", HIGH_SCORE_KEY, raw);
                0
            }
        },
    }
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
    /// Number of saves performed
    pub saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self {
            value: Some(score),
            saves: 0,
        }
    }

    pub fn stored(&self) -> Option<u64> {
        self.value
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> u64 {
        self.value.unwrap_or(0)
    }

    fn save_high_score(&mut self, score: u64) {
        self.value = Some(score);
        self.saves += 1;
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load_high_score(&self) -> u64 {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(raw)) = storage.get_item(HIGH_SCORE_KEY) {
                let score = parse_high_score(&raw);
                log::info!("Loaded high score {}", score);
                return score;
            }
        }

        log::info!("No high score found, starting fresh");
        0
    }

    fn save_high_score(&mut self, score: u64) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(HIGH_SCORE_KEY, &score.to_string()).is_err() {
                    log::warn!("Failed to write high score");
                } else {
                    log::info!("High score saved ({})", score);
                }
            }
            None => log::warn!("LocalStorage unavailable, high score not saved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_high_score() {
        assert_eq!(parse_high_score("120"), 120);
        assert_eq!(parse_high_score(" 42\n"), 42);
        assert_eq!(parse_high_score("87.0"), 87);
        assert_eq!(parse_high_score(""), 0);
        assert_eq!(parse_high_score("null"), 0);
        assert_eq!(parse_high_score("-5"), 0);
        assert_eq!(parse_high_score("NaN"), 0);
    }

    #[test]
    fn test_memory_store_defaults_to_zero() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_high_score(), 0);
        assert_eq!(store.stored(), None);
        store.save_high_score(33);
        assert_eq!(store.load_high_score(), 33);
        assert_eq!(store.saves, 1);
    }
}
