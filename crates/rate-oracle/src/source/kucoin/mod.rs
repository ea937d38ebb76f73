//! KuCoin rate source.
//!
//! Reads `/api/v1/market/allTickers`, which returns every spot ticker in one
//! call. Symbols already use the `BASE-QUOTE` form.

use std::any::Any;
use std::str::FromStr;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::RateOracleError;
use crate::models::{combine_to_pair, split_pair, Prices};
use crate::source::{http_client, RateSource};

const PROVIDER_ID: &str = "kucoin";

const ALL_TICKERS_URL: &str = "https://api.kucoin.com/api/v1/market/allTickers";

/// KuCoin success code
const SUCCESS_CODE: &str = "200000";

#[derive(Debug, Deserialize)]
struct AllTickersResponse {
    code: String,
    data: Option<AllTickersData>,
}

#[derive(Debug, Deserialize)]
struct AllTickersData {
    ticker: Vec<KucoinTicker>,
}

#[derive(Debug, Deserialize)]
struct KucoinTicker {
    symbol: String,
    buy: Option<String>,
    sell: Option<String>,
}

/// Rate source backed by api.kucoin.com.
pub struct KucoinRateSource {
    client: Client,
}

impl KucoinRateSource {
    pub fn new() -> Self {
        Self {
            client: http_client(),
        }
    }
}

impl Default for KucoinRateSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateSource for KucoinRateSource {
    fn name(&self) -> &'static str {
        PROVIDER_ID
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    async fn get_prices(&self, quote_token: &str) -> Result<Prices, RateOracleError> {
        debug!("Fetching KuCoin tickers");

        let response = self.client.get(ALL_TICKERS_URL).send().await?;
        if !response.status().is_success() {
            return Err(RateOracleError::ProviderError {
                source_name: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let body: AllTickersResponse = response.json().await?;
        ticker_prices(body, quote_token)
    }
}

fn ticker_prices(body: AllTickersResponse, quote_token: &str) -> Result<Prices, RateOracleError> {
    if body.code != SUCCESS_CODE {
        return Err(RateOracleError::ProviderError {
            source_name: PROVIDER_ID.to_string(),
            message: format!("API returned code {}", body.code),
        });
    }
    let data = body.data.ok_or_else(|| RateOracleError::InvalidResponse {
        source_name: PROVIDER_ID.to_string(),
        message: "missing data".to_string(),
    })?;

    let quote = quote_token.to_uppercase();
    let mut prices = Prices::new();

    for ticker in data.ticker {
        let Some((base, ticker_quote)) = split_pair(&ticker.symbol) else {
            continue;
        };
        if ticker_quote != quote {
            continue;
        }
        let bid = ticker.buy.as_deref().and_then(|v| Decimal::from_str(v).ok());
        let ask = ticker.sell.as_deref().and_then(|v| Decimal::from_str(v).ok());
        if let (Some(bid), Some(ask)) = (bid, ask) {
            if bid.is_zero() || ask.is_zero() {
                continue;
            }
            prices.insert(combine_to_pair(base, &quote), (bid + ask) / Decimal::TWO);
        }
    }

    Ok(prices)
}
