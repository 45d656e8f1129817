use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use thiserror::Error;

use crate::{Difficulty, Score, SoundSetting};

pub const BEST_KEY_PREFIX: &str = "memory-best-";
pub const SOUND_KEY: &str = "memory-sound";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage is not available")]
    Unavailable,
    #[error("Storage rejected the write: {0}")]
    Rejected(String),
}

/// Minimal string key-value storage the game persists into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Store that lives as long as the value does.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn best_key(difficulty: Difficulty) -> String {
    format!("{}{}", BEST_KEY_PREFIX, difficulty.id())
}

/// Result of handing a finished round to the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub score: Score,
    pub best: Score,
    pub is_new_best: bool,
}

/// Best scores per difficulty plus the sound preference, over any
/// [`KeyValueStore`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameStore<S> {
    store: S,
}

impl<S: KeyValueStore> GameStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Missing and unreadable records both come back as `None`.
    pub fn load(&self, difficulty: Difficulty) -> Option<Score> {
        let key = best_key(difficulty);
        let raw = self.store.get(&key)?;
        match serde_json::from_str::<Option<Score>>(&raw) {
            Ok(score) => score,
            Err(err) => {
                log::warn!("ignoring unreadable record {}: {}", key, err);
                None
            }
        }
    }

    pub fn save(&mut self, difficulty: Difficulty, score: Score) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&score).map_err(|err| StoreError::Rejected(err.to_string()))?;
        self.store.set(&best_key(difficulty), &raw)
    }

    /// Compares a finished round against the stored best and keeps the better one.
    pub fn submit(&mut self, difficulty: Difficulty, score: Score) -> Submission {
        let previous = self.load(difficulty);
        if !score.beats(previous.as_ref()) {
            // `beats` only fails against an existing record
            let best = previous.unwrap_or(score);
            return Submission {
                score,
                best,
                is_new_best: false,
            };
        }

        log::debug!("new best for {}: {:?}", difficulty, score);
        if let Err(err) = self.save(difficulty, score) {
            log::error!("Could not save best score: {}", err);
        }
        Submission {
            score,
            best: score,
            is_new_best: true,
        }
    }

    pub fn sound(&self) -> SoundSetting {
        SoundSetting::parse_or_default(self.store.get(SOUND_KEY).as_deref())
    }

    pub fn set_sound(&mut self, sound: SoundSetting) -> Result<(), StoreError> {
        self.store.set(SOUND_KEY, sound.as_str())
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
