use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::core::confidence::DEFAULT_PRIOR;
use crate::error::BotError;

/// Per-symbol smoothed confidence carried across cycles. Loaded at cycle
/// start, updated per analyzed symbol, saved wholesale before any trade
/// decision. Owned by the cycle; never shared across cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceMemory {
    values: HashMap<String, f64>,
}

impl ConfidenceMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored confidence for a symbol, or the 0.5 default prior.
    pub fn prior(&self, symbol: &str) -> f64 {
        self.values.get(symbol).copied().unwrap_or(DEFAULT_PRIOR)
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.values.get(symbol).copied()
    }

    pub fn update(&mut self, symbol: &str, confidence: f64) {
        self.values.insert(symbol.to_string(), confidence);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// On-disk home of the confidence memory: one JSON object, symbol to number.
pub struct LearningStore {
    path: PathBuf,
}

impl LearningStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Absent or unreadable state is an empty memory, not an error.
    pub fn load(&self) -> ConfidenceMemory {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Discarding unreadable learning file {:?}: {}", self.path, e);
                ConfidenceMemory::new()
            }),
            Err(_) => ConfidenceMemory::new(),
        }
    }

    /// Overwrites the whole file. Failures propagate to the cycle boundary.
    pub fn save(&self, memory: &ConfidenceMemory) -> Result<(), BotError> {
        ensure_parent(&self.path)?;
        let json = serde_json::to_string_pretty(memory)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

pub(crate) fn ensure_parent(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::temp_path;

    #[test]
    fn prior_defaults_to_half() {
        let memory = ConfidenceMemory::new();
        assert!((memory.prior("BTCUSDT") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn round_trip_preserves_the_mapping() {
        let store = LearningStore::new(temp_path("learning_round_trip"));

        let mut memory = ConfidenceMemory::new();
        memory.update("BTCUSDT", 0.75);
        memory.update("XAUUSDT", 0.5);

        store.save(&memory).unwrap();
        assert_eq!(store.load(), memory);
    }

    #[test]
    fn empty_round_trip_is_empty() {
        let store = LearningStore::new(temp_path("learning_empty"));
        store.save(&ConfidenceMemory::new()).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn absent_file_loads_empty() {
        let store = LearningStore::new(temp_path("learning_absent_never_written"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let path = temp_path("learning_corrupt");
        fs::write(&path, "not valid json {{{").unwrap();
        let store = LearningStore::new(path);
        assert!(store.load().is_empty());
    }
}
