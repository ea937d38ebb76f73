//! Rate oracle models
//!
//! - `types` - Type aliases and trading pair helpers shared by rate sources

mod types;

pub use types::{combine_to_pair, split_pair, Prices, TradingPair};
