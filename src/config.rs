#[derive(Debug, Clone)]
pub struct Config {
    // Exchange
    pub coinex_api_key: String,
    pub coinex_api_secret: String,

    // Notification
    pub telegram_bot_token: String,
    pub telegram_chat_id: i64,

    // Universe, fixed at startup
    pub symbols: Vec<String>,

    // Cycle cadence
    pub poll_interval_secs: u64,

    // Persistence
    pub learning_file: String,
    pub trade_log_file: String,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let symbols: Vec<String> = env("SYMBOLS", "BTCUSDT,XAUUSDT")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Config {
            coinex_api_key: env("COINEX_API_KEY", ""),
            coinex_api_secret: env("COINEX_API_SECRET", ""),
            telegram_bot_token: env("TELEGRAM_BOT_TOKEN", ""),
            telegram_chat_id: env("TELEGRAM_CHAT_ID", "0").parse().unwrap_or(0),
            symbols,
            poll_interval_secs: env("POLL_INTERVAL", "60").parse().unwrap_or(60),
            learning_file: env("LEARNING_FILE", "market_learning.json"),
            trade_log_file: env("TRADE_LOG_FILE", "trade_log.json"),
            log_level: env("LOG_LEVEL", "info"),
        }
    }
}
