use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::error;

use crate::config::Config;

/// Fire-and-forget status channel. Delivery failures are logged and
/// swallowed; a dead channel must never take the trading loop down.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str);
}

pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(cfg: &Config) -> Self {
        Self {
            bot: Bot::new(cfg.telegram_bot_token.clone()),
            chat_id: ChatId(cfg.telegram_chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) {
        if let Err(e) = self.bot.send_message(self.chat_id, text).await {
            error!("Failed to send Telegram message: {}", e);
        }
    }
}
