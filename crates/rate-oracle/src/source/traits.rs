//! Rate source trait definitions.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::RateOracleError;
use crate::models::Prices;

/// Zero-argument constructor stored in the registry.
pub type SourceConstructor = fn() -> Arc<dyn RateSource>;

/// Trait for exchange rate sources.
///
/// Implement this trait and add a variant to
/// [`RateSourceId`](crate::registry::RateSourceId) to make a new source
/// selectable through `MY_RATE_ORACLE`.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use rate_oracle::{Prices, RateOracleError, RateSource};
///
/// #[derive(Default)]
/// struct MySource;
///
/// #[async_trait]
/// impl RateSource for MySource {
///     fn name(&self) -> &'static str {
///         "my_source"
///     }
///
///     fn as_any(&self) -> &dyn std::any::Any {
///         self
///     }
///
///     async fn get_prices(&self, quote_token: &str) -> Result<Prices, RateOracleError> {
///         // ... call the exchange
///     }
/// }
/// ```
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Registry key of this source, e.g. "binance".
    fn name(&self) -> &'static str;

    /// Access to the concrete type, used to check which implementation
    /// the oracle selected.
    fn as_any(&self) -> &dyn Any;

    /// Fetch the latest prices of every pair quoted in `quote_token`.
    ///
    /// Keys are `BASE-QUOTE` trading pairs.
    async fn get_prices(&self, quote_token: &str) -> Result<Prices, RateOracleError>;
}
