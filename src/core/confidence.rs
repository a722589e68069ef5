use crate::error::BotError;
use crate::models::Side;

/// Multiplier turning a small relative price deviation into a
/// confidence-like scalar centered on 0.5.
pub const SENSITIVITY: f64 = 50.0;

/// Prior used for a symbol with no stored history.
pub const DEFAULT_PRIOR: f64 = 0.5;

/// Outcome of analyzing one symbol's recent closes against its prior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Analysis {
    /// Smoothed confidence, already blended with the prior.
    pub confidence: f64,
    /// This cycle's observation before smoothing.
    pub raw_confidence: f64,
    pub relative_change: f64,
    pub side: Side,
    pub last_close: f64,
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Pure signal engine: blends the fresh observation with the stored prior.
///
/// `raw = round2(0.5 + change * 50)` and `confidence = (prior + raw) / 2`,
/// a fixed-weight one-step smoother. The result is intentionally not clamped
/// to [0, 1]: a large enough move produces an out-of-range "super-signal",
/// matching the live behavior this engine was tuned against.
pub fn analyze(symbol: &str, closes: &[f64], prior: f64) -> Result<Analysis, BotError> {
    let last = *closes.last().ok_or_else(|| BotError::EmptySample {
        symbol: symbol.to_string(),
    })?;

    let avg = closes.iter().sum::<f64>() / closes.len() as f64;
    if avg == 0.0 {
        return Err(BotError::DegenerateInput {
            symbol: symbol.to_string(),
        });
    }

    let relative_change = (last - avg) / avg;
    let raw_confidence = round2(0.5 + relative_change * SENSITIVITY);
    let confidence = (prior + raw_confidence) / 2.0;

    let side = if relative_change > 0.0 {
        Side::Buy
    } else {
        Side::Sell
    };

    Ok(Analysis {
        confidence,
        raw_confidence,
        relative_change,
        side,
        last_close: last,
    })
}
