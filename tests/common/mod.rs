use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use jb_futures_bot::config::Config;
use jb_futures_bot::error::BotError;
use jb_futures_bot::exchange::Exchange;
use jb_futures_bot::models::{OrderRequest, TopOfBook};
use jb_futures_bot::notify::Notifier;

/// A mock exchange serving canned closes and a fixed book, recording every
/// submitted order through a shared handle.
pub struct MockExchange {
    pub closes: HashMap<String, Vec<f64>>,
    pub book: TopOfBook,
    pub balance: f64,
    pub failing: HashSet<String>,
    pub reject_orders: bool,
    submitted: Arc<Mutex<Vec<OrderRequest>>>,
}

impl MockExchange {
    pub fn new() -> Self {
        Self {
            closes: HashMap::new(),
            book: TopOfBook {
                best_bid: 50000.0,
                best_ask: 50000.0,
            },
            balance: 1000.0,
            failing: HashSet::new(),
            reject_orders: false,
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_closes(mut self, symbol: &str, closes: Vec<f64>) -> Self {
        self.closes.insert(symbol.to_string(), closes);
        self
    }

    pub fn with_failing(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_string());
        self
    }

    /// Handle that stays valid after the exchange moves into the bot.
    pub fn submissions(&self) -> Arc<Mutex<Vec<OrderRequest>>> {
        Arc::clone(&self.submitted)
    }
}

#[async_trait]
impl Exchange for MockExchange {
    async fn fetch_closes(&mut self, symbol: &str) -> Result<Vec<f64>, BotError> {
        if self.failing.contains(symbol) {
            return Err(BotError::Response(format!("simulated outage for {symbol}")));
        }
        self.closes
            .get(symbol)
            .cloned()
            .ok_or_else(|| BotError::Response(format!("unknown symbol {symbol}")))
    }

    async fn fetch_top_of_book(&mut self, _symbol: &str) -> Result<TopOfBook, BotError> {
        Ok(self.book)
    }

    async fn fetch_available_balance(&mut self) -> Result<f64, BotError> {
        Ok(self.balance)
    }

    async fn submit_order(&mut self, order: &OrderRequest) -> Result<(), BotError> {
        if self.reject_orders {
            return Err(BotError::Submission("simulated rejection".to_string()));
        }
        self.submitted.lock().unwrap().push(order.clone());
        Ok(())
    }
}

/// Notifier that records every message instead of sending it anywhere.
#[derive(Default)]
pub struct CaptureNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CaptureNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.messages)
    }
}

#[async_trait]
impl Notifier for CaptureNotifier {
    async fn send(&self, text: &str) {
        self.messages.lock().unwrap().push(text.to_string());
    }
}

/// A Config pointing all persistence at a unique temp dir per test.
pub fn test_config(tag: &str) -> Config {
    let dir = std::env::temp_dir().join(format!("jb_bot_integ_{}_{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let _ = std::fs::create_dir_all(&dir);

    Config {
        coinex_api_key: String::new(),
        coinex_api_secret: String::new(),
        telegram_bot_token: String::new(),
        telegram_chat_id: 0,
        symbols: vec!["BTCUSDT".to_string(), "XAUUSDT".to_string()],
        poll_interval_secs: 60,
        learning_file: dir
            .join("market_learning.json")
            .to_string_lossy()
            .to_string(),
        trade_log_file: dir.join("trade_log.json").to_string_lossy().to_string(),
        log_level: "info".to_string(),
    }
}
