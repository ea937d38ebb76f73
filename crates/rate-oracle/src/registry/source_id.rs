use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::source::{
    BinanceRateSource, BinanceUsRateSource, CoinGeckoRateSource, KucoinRateSource, RateSource,
    SourceConstructor,
};

/// Identifiers of every selectable rate source.
///
/// Adding a source means adding a variant here, so the set of valid
/// `MY_RATE_ORACLE` values is visible at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateSourceId {
    Binance,
    BinanceUs,
    CoinGecko,
    Kucoin,
}

impl RateSourceId {
    pub const ALL: [Self; 4] = [Self::Binance, Self::BinanceUs, Self::CoinGecko, Self::Kucoin];

    /// Source used whenever the configured name cannot be resolved.
    pub const DEFAULT: Self = Self::Binance;

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binance => "binance",
            Self::BinanceUs => "binance_us",
            Self::CoinGecko => "coingecko",
            Self::Kucoin => "kucoin",
        }
    }

    /// Exact, case-sensitive match against the known keys.
    pub fn lookup(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == key)
    }

    pub fn constructor(self) -> SourceConstructor {
        match self {
            Self::Binance => build::<BinanceRateSource>,
            Self::BinanceUs => build::<BinanceUsRateSource>,
            Self::CoinGecko => build::<CoinGeckoRateSource>,
            Self::Kucoin => build::<KucoinRateSource>,
        }
    }
}

impl Display for RateSourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn build<S>() -> Arc<dyn RateSource>
where
    S: RateSource + Default + 'static,
{
    Arc::new(S::default())
}
