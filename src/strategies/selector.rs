use tracing::{debug, warn};

use crate::core::confidence::{self, Analysis};
use crate::error::BotError;
use crate::exchange::Exchange;
use crate::notify::Notifier;
use crate::strategies::signals::Signal;
use crate::trading::learning::ConfidenceMemory;

/// Runs the signal engine over the whole universe once per cycle and keeps
/// the single best candidate.
pub struct Selector {
    symbols: Vec<String>,
}

impl Selector {
    pub fn new(symbols: Vec<String>) -> Self {
        Self { symbols }
    }

    /// One pass over the universe in iteration order. A failed symbol is
    /// reported and skipped; its stored confidence is left untouched.
    ///
    /// The best candidate is tracked with a strict `>` against a floor of
    /// 0.0, so ties keep the earlier symbol and a pass where nothing beats
    /// the floor yields `None`.
    pub async fn select(
        &self,
        market: &mut dyn Exchange,
        memory: &mut ConfidenceMemory,
        notifier: &dyn Notifier,
    ) -> Option<Signal> {
        let mut best: Option<Signal> = None;
        let mut best_confidence = 0.0;

        for symbol in &self.symbols {
            let analysis = match self.analyze_symbol(market, memory, symbol).await {
                Ok(a) => a,
                Err(e) => {
                    warn!("Analysis failed for {}: {}", symbol, e);
                    notifier
                        .send(&format!("[JB-Futures] analysis failed for {symbol}: {e}"))
                        .await;
                    continue;
                }
            };

            memory.update(symbol, analysis.confidence);
            debug!(
                "{}: confidence {:.4} raw {:.2} ({})",
                symbol, analysis.confidence, analysis.raw_confidence, analysis.side
            );

            if analysis.confidence > best_confidence {
                best_confidence = analysis.confidence;
                best = Some(Signal {
                    symbol: symbol.clone(),
                    side: analysis.side,
                    confidence: analysis.confidence,
                    entry: analysis.last_close,
                });
            }
        }

        best
    }

    async fn analyze_symbol(
        &self,
        market: &mut dyn Exchange,
        memory: &ConfidenceMemory,
        symbol: &str,
    ) -> Result<Analysis, BotError> {
        let closes = market.fetch_closes(symbol).await?;
        confidence::analyze(symbol, &closes, memory.prior(symbol))
    }
}
