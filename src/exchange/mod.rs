pub mod coinex;

pub use coinex::CoinexClient;

use async_trait::async_trait;

use crate::error::BotError;
use crate::models::{OrderRequest, TopOfBook};

#[async_trait]
pub trait Exchange: Send + Sync {
    /// Recent closing prices for a symbol, oldest first.
    async fn fetch_closes(&mut self, symbol: &str) -> Result<Vec<f64>, BotError>;

    async fn fetch_top_of_book(&mut self, symbol: &str) -> Result<TopOfBook, BotError>;

    /// Available margin balance in USDT, as of this call.
    async fn fetch_available_balance(&mut self) -> Result<f64, BotError>;

    async fn submit_order(&mut self, order: &OrderRequest) -> Result<(), BotError>;
}
