use std::fs;
use std::path::PathBuf;
use tracing::warn;

use crate::error::BotError;
use crate::models::TradeLogEntry;
use crate::trading::learning::ensure_parent;

/// Append-only record of executed orders, kept as a pretty-printed JSON
/// array. Read-append-rewrite on every append; existing entries are never
/// truncated, and a corrupt file starts a fresh sequence rather than
/// blocking trading.
pub struct TradeLog {
    path: PathBuf,
}

impl TradeLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn read_all(&self) -> Vec<TradeLogEntry> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Discarding unreadable trade log {:?}: {}", self.path, e);
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    pub fn append(&self, entry: TradeLogEntry) -> Result<(), BotError> {
        let mut entries = self.read_all();
        entries.push(entry);

        ensure_parent(&self.path)?;
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Side;
    use crate::test_helpers::temp_path;

    fn entry(symbol: &str, price: f64) -> TradeLogEntry {
        TradeLogEntry {
            symbol: symbol.to_string(),
            side: Side::Buy,
            price,
            confidence: 0.95,
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn appends_preserve_earlier_entries() {
        let log = TradeLog::new(temp_path("trade_log_append"));

        log.append(entry("BTCUSDT", 50050.0)).unwrap();
        log.append(entry("XAUUSDT", 2001.0)).unwrap();

        let entries = log.read_all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].symbol, "BTCUSDT");
        assert_eq!(entries[1].symbol, "XAUUSDT");
    }

    #[test]
    fn corrupt_log_starts_fresh_on_append() {
        let path = temp_path("trade_log_corrupt");
        fs::write(&path, "][").unwrap();

        let log = TradeLog::new(path);
        log.append(entry("BTCUSDT", 50050.0)).unwrap();

        let entries = log.read_all();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn absent_log_reads_empty() {
        let log = TradeLog::new(temp_path("trade_log_absent_never_written"));
        assert!(log.read_all().is_empty());
    }
}
