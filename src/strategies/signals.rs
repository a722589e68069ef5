use serde::{Deserialize, Serialize};

use crate::models::Side;

/// The single actionable candidate produced by one selection pass.
/// Immutable once built; consumed by the trade executor and discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub side: Side,
    pub confidence: f64,
    /// Last close at analysis time.
    pub entry: f64,
}
