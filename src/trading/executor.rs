use chrono::Utc;
use tracing::info;

use crate::core::confidence::round2;
use crate::error::BotError;
use crate::exchange::Exchange;
use crate::models::{OrderRequest, Side, TopOfBook, TradeLogEntry};
use crate::strategies::signals::Signal;

/// Fraction of the available balance committed as margin per trade.
pub const MARGIN_FRACTION: f64 = 0.05;

/// Minimum viable order value in USDT.
pub const MIN_MARGIN: f64 = 1.0;

pub const LEVERAGE: u32 = 3;

/// Fixed contract quantity per order.
// TODO: wire the computed margin into the order quantity once the sizing
// rule is settled; the margin currently acts only as a balance gate.
pub const ORDER_AMOUNT: f64 = 0.01;

const BUY_SLIPPAGE: f64 = 1.001;
const SELL_SLIPPAGE: f64 = 0.999;

pub fn margin_for(balance: f64) -> f64 {
    round2(balance * MARGIN_FRACTION)
}

/// Limit price with the slippage allowance applied toward immediate fill:
/// a buy crosses slightly above the best ask, a sell slightly below the
/// best bid.
pub fn limit_price(side: Side, book: &TopOfBook) -> f64 {
    match side {
        Side::Buy => round2(book.best_ask * BUY_SLIPPAGE),
        Side::Sell => round2(book.best_bid * SELL_SLIPPAGE),
    }
}

pub fn build_order(signal: &Signal, price: f64, external_oid: String) -> OrderRequest {
    OrderRequest {
        market: signal.symbol.clone(),
        price,
        amount: ORDER_AMOUNT,
        side: signal.side.venue_code(),
        leverage: LEVERAGE,
        position_id: 0,
        open_type: 1,
        external_oid,
    }
}

fn external_oid() -> String {
    format!("jb-{}", Utc::now().timestamp())
}

/// Sizes, prices, builds and submits an order for an already-qualified
/// signal. Balance is re-fetched here, never cached, so sizing always sees
/// the venue's current number. Insufficient balance surfaces as
/// `BotError::InsufficientBalance`; submission failures propagate untouched.
pub async fn execute_signal(
    market: &mut dyn Exchange,
    signal: &Signal,
) -> Result<TradeLogEntry, BotError> {
    let balance = market.fetch_available_balance().await?;
    let margin = margin_for(balance);
    if margin < MIN_MARGIN {
        return Err(BotError::InsufficientBalance {
            margin,
            min: MIN_MARGIN,
        });
    }

    let book = market.fetch_top_of_book(&signal.symbol).await?;
    let price = limit_price(signal.side, &book);
    let order = build_order(signal, price, external_oid());

    info!(
        "Placing {} {} @ {:.2} ({}x, oid {})",
        signal.side, signal.symbol, price, LEVERAGE, order.external_oid
    );
    market.submit_order(&order).await?;

    Ok(TradeLogEntry {
        symbol: signal.symbol.clone(),
        side: signal.side,
        price,
        confidence: signal.confidence,
        timestamp: Utc::now().timestamp(),
    })
}
