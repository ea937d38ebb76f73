//! CoinGecko rate source.
//!
//! Uses the public `coins/markets` endpoint, which returns coins ordered by
//! market cap. CoinGecko prices against fiat currencies, so USD-pegged
//! stablecoin quotes are priced in USD.

use std::any::Any;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::RateOracleError;
use crate::models::{combine_to_pair, Prices};
use crate::source::{http_client, RateSource};

const PROVIDER_ID: &str = "coingecko";

const MARKETS_URL: &str = "https://api.coingecko.com/api/v3/coins/markets";

/// Quote tokens priced as USD
const USD_STABLECOINS: &[&str] = &["USDT", "USDC", "BUSD", "DAI"];

/// Coins per page, the API maximum
const PAGE_SIZE: u32 = 250;

#[derive(Debug, Deserialize)]
struct MarketEntry {
    symbol: String,
    current_price: Option<f64>,
}

/// Rate source backed by api.coingecko.com.
pub struct CoinGeckoRateSource {
    client: Client,
}

impl CoinGeckoRateSource {
    pub fn new() -> Self {
        Self {
            client: http_client(),
        }
    }

    /// CoinGecko `vs_currency` for a quote token.
    fn vs_currency(quote_token: &str) -> String {
        let quote = quote_token.to_uppercase();
        if USD_STABLECOINS.contains(&quote.as_str()) {
            "usd".to_string()
        } else {
            quote.to_lowercase()
        }
    }
}

impl Default for CoinGeckoRateSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateSource for CoinGeckoRateSource {
    fn name(&self) -> &'static str {
        PROVIDER_ID
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    async fn get_prices(&self, quote_token: &str) -> Result<Prices, RateOracleError> {
        let url = format!(
            "{}?vs_currency={}&order=market_cap_desc&per_page={}&page=1",
            MARKETS_URL,
            Self::vs_currency(quote_token),
            PAGE_SIZE
        );
        debug!("Fetching CoinGecko markets: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(RateOracleError::ProviderError {
                source_name: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let entries: Vec<MarketEntry> = response.json().await?;
        Ok(market_prices(&entries, quote_token))
    }
}

/// Prices keyed by `SYMBOL-QUOTE`.
///
/// Several coins can share a ticker symbol; the first one wins since the
/// list is ordered by market cap.
fn market_prices(entries: &[MarketEntry], quote_token: &str) -> Prices {
    let mut prices = Prices::new();

    for entry in entries {
        let Some(price) = entry.current_price.and_then(|p| Decimal::try_from(p).ok()) else {
            continue;
        };
        prices
            .entry(combine_to_pair(&entry.symbol, quote_token))
            .or_insert(price);
    }

    prices
}
