use anyhow::Result;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::BotError;
use crate::exchange::Exchange;
use crate::notify::Notifier;
use crate::strategies::Selector;
use crate::trading::executor;
use crate::trading::{LearningStore, TradeLog};

/// Minimum smoothed confidence before an order is placed.
pub const CONFIDENCE_THRESHOLD: f64 = 0.9;

/// The cycle controller: one sequential fetch -> decide -> execute pass per
/// poll interval. Every error inside a cycle stops at this boundary; the
/// loop itself only ends on Ctrl+C.
pub struct FuturesBot {
    config: Config,
    market: Box<dyn Exchange>,
    notifier: Box<dyn Notifier>,
    selector: Selector,
    store: LearningStore,
    trade_log: TradeLog,
}

impl FuturesBot {
    pub fn new(config: Config, market: Box<dyn Exchange>, notifier: Box<dyn Notifier>) -> Self {
        info!("{}", "=".repeat(60));
        info!("JB Futures bot starting up");
        info!("Universe: {}", config.symbols.join(", "));
        info!("Poll interval: {}s", config.poll_interval_secs);
        info!("Confidence threshold: {}", CONFIDENCE_THRESHOLD);
        info!("{}", "=".repeat(60));

        let selector = Selector::new(config.symbols.clone());
        let store = LearningStore::new(&config.learning_file);
        let trade_log = TradeLog::new(&config.trade_log_file);

        Self {
            config,
            market,
            notifier,
            selector,
            store,
            trade_log,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Bot is now running. Press Ctrl+C to stop.");

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    self.shutdown();
                    return Ok(());
                }
                _ = self.tick() => {}
            }
        }
    }

    async fn tick(&mut self) {
        if let Err(e) = self.run_cycle().await {
            error!("Cycle failed: {}", e);
            self.notifier
                .send(&format!("[JB-Futures] cycle failed: {e}"))
                .await;
        }

        tokio::time::sleep(Duration::from_secs(self.config.poll_interval_secs)).await;
    }

    /// One full cycle. Analysis failures were already recovered per symbol
    /// by the selector and insufficient balance is recovered here; anything
    /// else bubbles up to `tick`'s boundary.
    pub async fn run_cycle(&mut self) -> Result<(), BotError> {
        let mut memory = self.store.load();

        let best = self
            .selector
            .select(self.market.as_mut(), &mut memory, self.notifier.as_ref())
            .await;

        // Persisted before the trade decision so failed or idle cycles
        // still keep their smoothed state.
        self.store.save(&memory)?;

        let Some(signal) = best else {
            info!("No tradable candidate this cycle");
            self.notifier
                .send("[JB-Futures] no tradable candidate this cycle")
                .await;
            return Ok(());
        };

        if signal.confidence < CONFIDENCE_THRESHOLD {
            info!(
                "Best candidate {} at {:.2}, below threshold",
                signal.symbol, signal.confidence
            );
            self.notifier
                .send(&format!(
                    "[JB-Futures] no suitable trade; best candidate {} with confidence {:.2}",
                    signal.symbol, signal.confidence
                ))
                .await;
            return Ok(());
        }

        match executor::execute_signal(self.market.as_mut(), &signal).await {
            Ok(entry) => {
                self.trade_log.append(entry.clone())?;
                info!(
                    "Trade executed: {} {} @ {:.2}",
                    entry.side, entry.symbol, entry.price
                );
                self.notifier
                    .send(&format!(
                        "[JB-Futures] {} order placed\nSymbol: {}\nPrice: {:.2} USDT\nLeverage: {}x\nConfidence: {:.2}",
                        entry.side,
                        entry.symbol,
                        entry.price,
                        executor::LEVERAGE,
                        entry.confidence
                    ))
                    .await;
                Ok(())
            }
            Err(e @ BotError::InsufficientBalance { .. }) => {
                warn!("{}", e);
                self.notifier.send(&format!("[JB-Futures] {e}")).await;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn shutdown(&self) {
        info!("Shutting down...");
        info!("Trades recorded: {}", self.trade_log.read_all().len());
        info!("Bot stopped.");
    }
}
