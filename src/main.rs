use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use jb_futures_bot::bot::FuturesBot;
use jb_futures_bot::config::Config;
use jb_futures_bot::exchange::CoinexClient;
use jb_futures_bot::notify::TelegramNotifier;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let market = Box::new(CoinexClient::new(&cfg));
    let notifier = Box::new(TelegramNotifier::new(&cfg));

    let mut bot = FuturesBot::new(cfg, market, notifier);
    bot.run().await?;

    Ok(())
}
