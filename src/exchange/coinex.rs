use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use sha2::Sha256;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::config::Config;
use crate::error::BotError;
use crate::exchange::Exchange;
use crate::models::{OrderRequest, TopOfBook};

type HmacSha256 = Hmac<Sha256>;

const BASE_URL: &str = "https://api.coinex.com";
const MARGIN_COIN: &str = "USDT";

/// Kline lookback: 10 bars of 15 minutes.
const KLINE_PERIOD_SECS: u32 = 900;
const KLINE_LIMIT: u32 = 10;

const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(100);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct KlineResponse {
    #[serde(default)]
    data: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct DepthResponse {
    data: DepthData,
}

#[derive(Debug, Deserialize)]
struct DepthData {
    #[serde(default)]
    asks: Vec<Vec<String>>,
    #[serde(default)]
    bids: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    data: AccountData,
}

#[derive(Debug, Deserialize)]
struct AccountData {
    #[serde(default)]
    assets: Vec<AssetBalance>,
}

#[derive(Debug, Deserialize)]
struct AssetBalance {
    margin_coin: String,
    available: String,
}

#[derive(Debug, Deserialize)]
struct CreateOrderResponse {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

pub struct CoinexClient {
    client: Client,
    api_key: String,
    api_secret: String,
    last_request: Option<Instant>,
}

impl CoinexClient {
    pub fn new(cfg: &Config) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: cfg.coinex_api_key.clone(),
            api_secret: cfg.coinex_api_secret.clone(),
            last_request: None,
        }
    }

    /// HMAC-SHA256 over `{method}{path}{timestamp}`, hex-encoded.
    fn sign(&self, method: &str, path: &str, timestamp: u64) -> String {
        let message = format!("{method}{path}{timestamp}");
        let mut mac = HmacSha256::new_from_slice(self.api_secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn timestamp_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    async fn rate_limit(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < MIN_REQUEST_INTERVAL {
                tokio::time::sleep(MIN_REQUEST_INTERVAL - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

fn value_to_f64(v: &serde_json::Value) -> Option<f64> {
    match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn top_level(levels: &[Vec<String>]) -> Option<f64> {
    levels.first()?.first()?.parse().ok()
}

#[async_trait]
impl Exchange for CoinexClient {
    async fn fetch_closes(&mut self, symbol: &str) -> Result<Vec<f64>, BotError> {
        self.rate_limit().await;

        let resp = self
            .client
            .get(format!("{BASE_URL}/v1/market/kline"))
            .query(&[
                ("market", symbol.to_string()),
                ("type", KLINE_PERIOD_SECS.to_string()),
                ("limit", KLINE_LIMIT.to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::Response(format!("kline {status}: {body}")));
        }

        let data: KlineResponse = resp.json().await?;

        // Kline rows are [timestamp, open, close, high, low, ...]; the close
        // this engine keys on sits at index 4.
        data.data
            .iter()
            .map(|row| {
                row.get(4).and_then(value_to_f64).ok_or_else(|| {
                    BotError::Response(format!("kline row missing close for {symbol}"))
                })
            })
            .collect()
    }

    async fn fetch_top_of_book(&mut self, symbol: &str) -> Result<TopOfBook, BotError> {
        self.rate_limit().await;

        let resp = self
            .client
            .get(format!("{BASE_URL}/v2/market/depth"))
            .query(&[("market", symbol.to_string()), ("limit", "1".to_string())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::Response(format!("depth {status}: {body}")));
        }

        let data: DepthResponse = resp.json().await?;

        let best_ask = top_level(&data.data.asks)
            .ok_or_else(|| BotError::Response(format!("no asks in depth for {symbol}")))?;
        let best_bid = top_level(&data.data.bids)
            .ok_or_else(|| BotError::Response(format!("no bids in depth for {symbol}")))?;

        Ok(TopOfBook { best_bid, best_ask })
    }

    async fn fetch_available_balance(&mut self) -> Result<f64, BotError> {
        self.rate_limit().await;

        let path = "/v2/perpetual/account";
        let ts = Self::timestamp_ms();
        let signature = self.sign("GET", path, ts);

        let resp = self
            .client
            .get(format!("{BASE_URL}{path}"))
            .header("X-COINEX-KEY", &self.api_key)
            .header("X-COINEX-SIGNATURE", signature)
            .header("X-COINEX-TIMESTAMP", ts.to_string())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::Response(format!("account {status}: {body}")));
        }

        let data: AccountResponse = resp.json().await?;

        // No USDT margin asset means nothing available to trade with.
        for asset in &data.data.assets {
            if asset.margin_coin == MARGIN_COIN {
                return asset.available.parse().map_err(|_| {
                    BotError::Response(format!(
                        "unparseable available balance: {}",
                        asset.available
                    ))
                });
            }
        }
        Ok(0.0)
    }

    async fn submit_order(&mut self, order: &OrderRequest) -> Result<(), BotError> {
        self.rate_limit().await;

        let path = "/v2/perpetual/order/create";
        let ts = Self::timestamp_ms();
        let signature = self.sign("POST", path, ts);

        let resp = self
            .client
            .post(format!("{BASE_URL}{path}"))
            .header("X-COINEX-KEY", &self.api_key)
            .header("X-COINEX-SIGNATURE", signature)
            .header("X-COINEX-TIMESTAMP", ts.to_string())
            .json(order)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::Submission(format!("{status}: {body}")));
        }

        let ack: CreateOrderResponse = resp.json().await?;
        if ack.code != 0 {
            return Err(BotError::Submission(format!(
                "code {}: {}",
                ack.code, ack.message
            )));
        }

        Ok(())
    }
}
