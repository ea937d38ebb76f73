use std::sync::Arc;

use lazy_static::lazy_static;

use super::RateOracleCell;
use crate::errors::RateOracleError;
use crate::models::Prices;
use crate::registry::RateSourceId;
use crate::source::RateSource;

lazy_static! {
    /// Process-wide oracle slot, resolved from `MY_RATE_ORACLE`.
    static ref SHARED_ORACLE: RateOracleCell = RateOracleCell::from_env();
}

/// The selected rate source for this process.
///
/// Obtain it with [`RateOracle::get_instance`]. The source is chosen once,
/// from `MY_RATE_ORACLE`, and every caller receives the same instance until
/// [`RateOracle::reset`] is called.
pub struct RateOracle {
    source: Arc<dyn RateSource>,
    source_id: RateSourceId,
    defaulted: bool,
    quote_token: String,
}

impl RateOracle {
    pub(crate) fn new(
        source: Arc<dyn RateSource>,
        source_id: RateSourceId,
        defaulted: bool,
        quote_token: String,
    ) -> Self {
        Self {
            source,
            source_id,
            defaulted,
            quote_token,
        }
    }

    /// Shared oracle, resolving the source on first access.
    pub fn get_instance() -> Arc<RateOracle> {
        SHARED_ORACLE.get_instance()
    }

    /// Discard the shared oracle. The next [`get_instance`](Self::get_instance)
    /// re-reads the environment.
    pub fn reset() {
        SHARED_ORACLE.reset();
    }

    pub fn source(&self) -> &Arc<dyn RateSource> {
        &self.source
    }

    pub fn source_id(&self) -> RateSourceId {
        self.source_id
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// True when the configured name was missing, empty or unknown.
    pub fn is_defaulted(&self) -> bool {
        self.defaulted
    }

    pub fn quote_token(&self) -> &str {
        &self.quote_token
    }

    /// Latest prices from the selected source, quoted in the configured
    /// quote token.
    pub async fn fetch_prices(&self) -> Result<Prices, RateOracleError> {
        self.source.get_prices(&self.quote_token).await
    }
}

impl std::fmt::Debug for RateOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateOracle")
            .field("source", &self.source_id)
            .field("defaulted", &self.defaulted)
            .field("quote_token", &self.quote_token)
            .finish()
    }
}
