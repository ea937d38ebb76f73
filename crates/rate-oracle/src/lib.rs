//! Rate Oracle
//!
//! Picks the exchange rate source for the whole process from the
//! `MY_RATE_ORACLE` environment variable and hands the same instance to
//! every caller.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +----------------------+
//! | RateOracle::     | --> |   RateOracleCell     |  (Uninitialized -> Resolving -> Ready)
//! |  get_instance()  |     +----------------------+
//! +------------------+                |
//!                                     v
//!                          +----------------------+
//!                          | RateSourceRegistry   |  (closed set of RateSourceId)
//!                          +----------------------+
//!                                     |
//!                                     v
//!                          +----------------------+
//!                          |     RateSource       |  (Binance, CoinGecko, ...)
//!                          +----------------------+
//! ```
//!
//! Unknown, empty and missing values all select the default source
//! (`binance`). Only a misconfigured registry is fatal, and only when the
//! registry is built.
//!
//! # Example
//!
//! ```ignore
//! use rate_oracle::RateOracle;
//!
//! let oracle = RateOracle::get_instance();
//! println!("using {}", oracle.source_name());
//! let prices = oracle.fetch_prices().await?;
//! ```

pub mod config;
pub mod errors;
pub mod models;
pub mod oracle;
pub mod registry;
pub mod source;

pub use config::{
    EnvLookup, OracleConfig, DEFAULT_QUOTE_TOKEN, QUOTE_TOKEN_ENV_VAR, RATE_ORACLE_ENV_VAR,
};
pub use errors::RateOracleError;
pub use models::{combine_to_pair, split_pair, Prices, TradingPair};
pub use oracle::{resolve_source, OracleState, RateOracle, RateOracleCell, Resolution};
pub use registry::{RateSourceId, RateSourceRegistry, RegistryEntry};
pub use source::{
    BinanceRateSource, BinanceUsRateSource, CoinGeckoRateSource, KucoinRateSource, RateSource,
    SourceConstructor,
};
