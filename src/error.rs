use thiserror::Error;

/// Failure kinds, each handled at the narrowest layer that can recover:
/// per-symbol analysis errors are skipped by the selector, insufficient
/// balance skips the trade, submission and storage failures bubble to the
/// cycle boundary.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("no price data returned for {symbol}")]
    EmptySample { symbol: String },

    #[error("degenerate price data for {symbol}: average close is zero")]
    DegenerateInput { symbol: String },

    #[error("malformed exchange response: {0}")]
    Response(String),

    #[error("exchange transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("insufficient balance: margin {margin:.2} USDT is below the {min:.2} USDT minimum")]
    InsufficientBalance { margin: f64, min: f64 },

    #[error("order submission rejected: {0}")]
    Submission(String),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
