//! Binance rate sources.
//!
//! Both the global and the US exchange expose the same public book ticker
//! and exchange info endpoints, so they share the request and parsing code
//! and differ only in host and registry key. Prices are the mid point
//! between best bid and best ask.
//!
//! Symbols carry no separator (`BTCBUSD`), so base and quote assets come
//! from the exchange's own symbol metadata rather than from the symbol text.

use std::any::Any;
use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::errors::RateOracleError;
use crate::models::{combine_to_pair, Prices};
use crate::source::{http_client, RateSource};

const BINANCE_ID: &str = "binance";
const BINANCE_US_ID: &str = "binance_us";

const BINANCE_BASE_URL: &str = "https://api.binance.com";
const BINANCE_US_BASE_URL: &str = "https://api.binance.us";

const BOOK_TICKER_PATH: &str = "/api/v3/ticker/bookTicker";
const EXCHANGE_INFO_PATH: &str = "/api/v3/exchangeInfo";

const TRADING_STATUS: &str = "TRADING";

/// One entry of the `/api/v3/ticker/bookTicker` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookTicker {
    symbol: String,
    bid_price: String,
    ask_price: String,
}

/// `/api/v3/exchangeInfo` response, reduced to the symbol list
#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SymbolInfo {
    symbol: String,
    status: String,
    base_asset: String,
    quote_asset: String,
}

/// Rate source backed by api.binance.com.
pub struct BinanceRateSource {
    client: Client,
}

impl BinanceRateSource {
    pub fn new() -> Self {
        Self {
            client: http_client(),
        }
    }
}

impl Default for BinanceRateSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateSource for BinanceRateSource {
    fn name(&self) -> &'static str {
        BINANCE_ID
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    async fn get_prices(&self, quote_token: &str) -> Result<Prices, RateOracleError> {
        fetch_book_tickers(&self.client, BINANCE_ID, BINANCE_BASE_URL, quote_token).await
    }
}

/// Rate source backed by api.binance.us.
pub struct BinanceUsRateSource {
    client: Client,
}

impl BinanceUsRateSource {
    pub fn new() -> Self {
        Self {
            client: http_client(),
        }
    }
}

impl Default for BinanceUsRateSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateSource for BinanceUsRateSource {
    fn name(&self) -> &'static str {
        BINANCE_US_ID
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    async fn get_prices(&self, quote_token: &str) -> Result<Prices, RateOracleError> {
        fetch_book_tickers(&self.client, BINANCE_US_ID, BINANCE_US_BASE_URL, quote_token).await
    }
}

async fn fetch_book_tickers(
    client: &Client,
    source_name: &str,
    base_url: &str,
    quote_token: &str,
) -> Result<Prices, RateOracleError> {
    let info: ExchangeInfo = get_json(client, source_name, base_url, EXCHANGE_INFO_PATH).await?;
    let tickers: Vec<BookTicker> =
        get_json(client, source_name, base_url, BOOK_TICKER_PATH).await?;
    Ok(mid_prices(&info.symbols, &tickers, quote_token))
}

async fn get_json<T: DeserializeOwned>(
    client: &Client,
    source_name: &str,
    base_url: &str,
    path: &str,
) -> Result<T, RateOracleError> {
    let url = format!("{}{}", base_url, path);
    debug!("Fetching {}", url);

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(RateOracleError::ProviderError {
            source_name: source_name.to_string(),
            message: format!("HTTP {} from {}", response.status(), path),
        });
    }

    Ok(response.json().await?)
}

/// Mid prices for every trading symbol whose quote asset is `quote_token`.
///
/// Tickers without symbol metadata or with an empty side are skipped.
fn mid_prices(symbols: &[SymbolInfo], tickers: &[BookTicker], quote_token: &str) -> Prices {
    let quote = quote_token.to_uppercase();
    let bases: HashMap<&str, &str> = symbols
        .iter()
        .filter(|info| info.status == TRADING_STATUS && info.quote_asset == quote)
        .map(|info| (info.symbol.as_str(), info.base_asset.as_str()))
        .collect();

    let mut prices = Prices::new();
    for ticker in tickers {
        let Some(base) = bases.get(ticker.symbol.as_str()) else {
            continue;
        };
        let (Ok(bid), Ok(ask)) = (
            Decimal::from_str(&ticker.bid_price),
            Decimal::from_str(&ticker.ask_price),
        ) else {
            continue;
        };
        if bid.is_zero() || ask.is_zero() {
            continue;
        }
        prices.insert(combine_to_pair(base, &quote), (bid + ask) / Decimal::TWO);
    }

    prices
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const EXCHANGE_INFO: &str = r#"{
        "timezone": "UTC",
        "symbols": [
            {"symbol":"BTCUSDT","status":"TRADING","baseAsset":"BTC","quoteAsset":"USDT"},
            {"symbol":"ETHUSDT","status":"TRADING","baseAsset":"ETH","quoteAsset":"USDT"},
            {"symbol":"ETHBTC","status":"TRADING","baseAsset":"ETH","quoteAsset":"BTC"},
            {"symbol":"DEADUSDT","status":"TRADING","baseAsset":"DEAD","quoteAsset":"USDT"},
            {"symbol":"OLDUSDT","status":"BREAK","baseAsset":"OLD","quoteAsset":"USDT"},
            {"symbol":"BTCBUSD","status":"TRADING","baseAsset":"BTC","quoteAsset":"BUSD"},
            {"symbol":"ETHTUSD","status":"TRADING","baseAsset":"ETH","quoteAsset":"TUSD"},
            {"symbol":"BTCUSD","status":"TRADING","baseAsset":"BTC","quoteAsset":"USD"}
        ]
    }"#;

    const BOOK_TICKERS: &str = r#"[
        {"symbol":"BTCUSDT","bidPrice":"60000.00","bidQty":"1.0","askPrice":"60002.00","askQty":"2.0"},
        {"symbol":"ETHUSDT","bidPrice":"3000.10","bidQty":"1.0","askPrice":"3000.30","askQty":"2.0"},
        {"symbol":"ETHBTC","bidPrice":"0.05","bidQty":"1.0","askPrice":"0.051","askQty":"2.0"},
        {"symbol":"DEADUSDT","bidPrice":"0.00000000","bidQty":"0","askPrice":"0.00000000","askQty":"0"},
        {"symbol":"OLDUSDT","bidPrice":"1.00","bidQty":"1.0","askPrice":"1.02","askQty":"2.0"},
        {"symbol":"NEWUSDT","bidPrice":"2.00","bidQty":"1.0","askPrice":"2.02","askQty":"2.0"}
    ]"#;

    fn parse(info: &str, tickers: &str) -> (Vec<SymbolInfo>, Vec<BookTicker>) {
        let info: ExchangeInfo = serde_json::from_str(info).unwrap();
        (info.symbols, serde_json::from_str(tickers).unwrap())
    }

    #[test]
    fn test_mid_prices_filters_by_quote() {
        let (symbols, tickers) = parse(EXCHANGE_INFO, BOOK_TICKERS);
        let prices = mid_prices(&symbols, &tickers, "usdt");

        assert_eq!(prices.len(), 2);
        assert_eq!(prices["BTC-USDT"], dec!(60001));
        assert_eq!(prices["ETH-USDT"], dec!(3000.20));
        assert!(!prices.contains_key("DEAD-USDT"));
        assert!(!prices.contains_key("OLD-USDT"));
        assert!(!prices.contains_key("NEW-USDT"));
    }

    #[test]
    fn test_mid_prices_other_quote() {
        let (symbols, tickers) = parse(EXCHANGE_INFO, BOOK_TICKERS);
        let prices = mid_prices(&symbols, &tickers, "BTC");

        assert_eq!(prices.len(), 1);
        assert_eq!(prices["ETH-BTC"], dec!(0.0505));
    }

    #[test]
    fn test_quote_suffix_is_not_a_quote_asset() {
        let (symbols, tickers) = parse(
            EXCHANGE_INFO,
            r#"[
                {"symbol":"BTCBUSD","bidPrice":"60000.00","bidQty":"1.0","askPrice":"60002.00","askQty":"2.0"},
                {"symbol":"ETHTUSD","bidPrice":"3000.00","bidQty":"1.0","askPrice":"3002.00","askQty":"2.0"}
            ]"#,
        );

        assert!(mid_prices(&symbols, &tickers, "USD").is_empty());

        let busd = mid_prices(&symbols, &tickers, "BUSD");
        assert_eq!(busd.len(), 1);
        assert_eq!(busd["BTC-BUSD"], dec!(60001));
    }

    #[test]
    fn test_source_names() {
        assert_eq!(BinanceRateSource::new().name(), "binance");
        assert_eq!(BinanceUsRateSource::new().name(), "binance_us");
    }
}
