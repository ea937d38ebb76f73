//! Rate source abstractions and implementations.
//!
//! This module contains:
//! - The `RateSource` trait that every selectable price source implements
//! - Concrete sources backed by public exchange ticker endpoints
//!
//! Sources are zero-argument constructible so the registry can build them
//! without any external configuration. Whether a constructed source can
//! actually reach its exchange is the source's own concern.

mod traits;

pub mod binance;
pub mod coingecko;
pub mod kucoin;

use std::time::Duration;

use reqwest::Client;

pub use binance::{BinanceRateSource, BinanceUsRateSource};
pub use coingecko::CoinGeckoRateSource;
pub use kucoin::KucoinRateSource;
pub use traits::{RateSource, SourceConstructor};

/// Default HTTP request timeout for source clients
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client shared by a source instance.
pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}
