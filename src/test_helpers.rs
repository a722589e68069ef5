use std::path::PathBuf;

use crate::models::Side;
use crate::strategies::signals::Signal;

/// Unique temp-file path per test name, isolated by process id.
pub fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("jb_futures_bot_{}_{}.json", tag, std::process::id()))
}

pub fn make_signal(symbol: &str, side: Side, confidence: f64, entry: f64) -> Signal {
    Signal {
        symbol: symbol.to_string(),
        side,
        confidence,
        entry,
    }
}
