use serde::{Deserialize, Serialize};

use crate::models::Side;

/// Best bid and ask at the moment of query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopOfBook {
    pub best_bid: f64,
    pub best_ask: f64,
}

/// CoinEx v2 perpetual limit order. Built once, submitted once, never
/// mutated afterwards; `external_oid` is unique per submission.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    pub market: String,
    pub price: f64,
    pub amount: f64,
    pub side: u8,
    pub leverage: u32,
    pub position_id: u64,
    pub open_type: u8,
    pub external_oid: String,
}

/// One executed order in the append-only trade log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeLogEntry {
    pub symbol: String,
    pub side: Side,
    pub price: f64,
    pub confidence: f64,
    pub timestamp: i64,
}
