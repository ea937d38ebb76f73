//! Registry of selectable rate sources.
//!
//! The registry maps source identifiers to zero-argument constructors. It is
//! validated when built: it must be non-empty, free of duplicates, and must
//! contain the default identifier. Lookups never fail loudly; an unknown key
//! simply yields `None`.

use lazy_static::lazy_static;
use log::debug;

use super::RateSourceId;
use crate::errors::RateOracleError;
use crate::source::SourceConstructor;

/// One registry entry.
#[derive(Clone, Copy)]
pub struct RegistryEntry {
    pub id: RateSourceId,
    pub constructor: SourceConstructor,
}

impl From<RateSourceId> for RegistryEntry {
    fn from(id: RateSourceId) -> Self {
        Self {
            id,
            constructor: id.constructor(),
        }
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry").field("id", &self.id).finish()
    }
}

/// Validated mapping from source identifier to constructor.
#[derive(Clone, Debug)]
pub struct RateSourceRegistry {
    entries: Vec<RegistryEntry>,
    default_id: RateSourceId,
}

lazy_static! {
    static ref BUILTIN_REGISTRY: RateSourceRegistry = RateSourceRegistry::new(
        RateSourceId::ALL.into_iter().map(RegistryEntry::from),
        RateSourceId::DEFAULT,
    )
    .expect("built-in rate source registry must be valid");
}

impl RateSourceRegistry {
    /// Build and validate a registry.
    pub fn new<I>(entries: I, default_id: RateSourceId) -> Result<Self, RateOracleError>
    where
        I: IntoIterator<Item = RegistryEntry>,
    {
        let mut validated: Vec<RegistryEntry> = Vec::new();
        for entry in entries {
            if validated.iter().any(|e| e.id == entry.id) {
                return Err(RateOracleError::DuplicateSource {
                    id: entry.id.to_string(),
                });
            }
            validated.push(entry);
        }

        if validated.is_empty() {
            return Err(RateOracleError::EmptyRegistry);
        }
        if !validated.iter().any(|e| e.id == default_id) {
            return Err(RateOracleError::MissingDefault {
                id: default_id.to_string(),
            });
        }

        debug!(
            "Rate source registry built with {} entries (default '{}')",
            validated.len(),
            default_id
        );

        Ok(Self {
            entries: validated,
            default_id,
        })
    }

    /// Registry holding every built-in source, defaulting to Binance.
    ///
    /// # Panics
    ///
    /// Panics on first use if the built-in definition is misconfigured.
    pub fn builtin() -> &'static RateSourceRegistry {
        &BUILTIN_REGISTRY
    }

    /// Constructor registered under `key`, if any.
    pub fn lookup(&self, key: &str) -> Option<SourceConstructor> {
        self.entry(key).map(|e| e.constructor)
    }

    /// Entry registered under `key`, if any. Matching is exact and
    /// case-sensitive.
    pub fn entry(&self, key: &str) -> Option<&RegistryEntry> {
        let id = RateSourceId::lookup(key)?;
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn default_entry(&self) -> &RegistryEntry {
        self.entries
            .iter()
            .find(|e| e.id == self.default_id)
            .unwrap_or(&self.entries[0])
    }

    pub fn default_id(&self) -> RateSourceId {
        self.default_id
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }

    /// Registered keys in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{KucoinRateSource, RateSource};
    use std::sync::Arc;

    #[test]
    fn test_builtin_contains_every_source() {
        let registry = RateSourceRegistry::builtin();

        assert_eq!(registry.len(), RateSourceId::ALL.len());
        assert_eq!(
            registry.names(),
            vec!["binance", "binance_us", "coingecko", "kucoin"]
        );
        assert_eq!(registry.default_id(), RateSourceId::Binance);
        assert_eq!(registry.default_entry().id, RateSourceId::Binance);
    }

    #[test]
    fn test_lookup_returns_constructor() {
        let registry = RateSourceRegistry::builtin();

        let constructor = registry.lookup("kucoin").expect("kucoin registered");
        assert_eq!(constructor().name(), "kucoin");
    }

    #[test]
    fn test_lookup_unknown_is_none() {
        let registry = RateSourceRegistry::builtin();

        assert!(registry.lookup("not_a_real_oracle").is_none());
        assert!(registry.lookup("").is_none());
        assert!(registry.lookup("COINGECKO").is_none());
        assert!(!registry.contains("Kucoin"));
    }

    #[test]
    fn test_empty_registry_rejected() {
        let result = RateSourceRegistry::new(Vec::new(), RateSourceId::Binance);
        assert!(matches!(result, Err(RateOracleError::EmptyRegistry)));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = RateSourceRegistry::new(
            [
                RegistryEntry::from(RateSourceId::Binance),
                RegistryEntry::from(RateSourceId::CoinGecko),
                RegistryEntry::from(RateSourceId::Binance),
            ],
            RateSourceId::Binance,
        );
        match result {
            Err(RateOracleError::DuplicateSource { id }) => assert_eq!(id, "binance"),
            other => panic!("expected DuplicateSource, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_default_rejected() {
        let result = RateSourceRegistry::new(
            [RegistryEntry::from(RateSourceId::CoinGecko)],
            RateSourceId::Binance,
        );
        match result {
            Err(RateOracleError::MissingDefault { id }) => assert_eq!(id, "binance"),
            other => panic!("expected MissingDefault, got {:?}", other),
        }
    }

    #[test]
    fn test_subset_registry() {
        let registry = RateSourceRegistry::new(
            [
                RegistryEntry::from(RateSourceId::CoinGecko),
                RegistryEntry::from(RateSourceId::Kucoin),
            ],
            RateSourceId::Kucoin,
        )
        .unwrap();

        assert!(registry.contains("coingecko"));
        assert!(!registry.contains("binance"));
        assert_eq!(registry.default_entry().id, RateSourceId::Kucoin);
    }

    fn renamed_kucoin() -> Arc<dyn RateSource> {
        Arc::new(KucoinRateSource::new())
    }

    #[test]
    fn test_entry_resolves_key_then_membership() {
        let registry = RateSourceRegistry::new(
            [RegistryEntry {
                id: RateSourceId::CoinGecko,
                constructor: renamed_kucoin,
            }],
            RateSourceId::CoinGecko,
        )
        .unwrap();

        let entry = registry.entry("coingecko").expect("coingecko registered");
        assert_eq!(entry.id, RateSourceId::CoinGecko);
        assert_eq!((entry.constructor)().name(), "kucoin");

        // Known key, not registered here.
        assert!(RateSourceId::lookup("kucoin").is_some());
        assert!(registry.entry("kucoin").is_none());
        assert!(registry.entry("not_a_real_oracle").is_none());
    }
}
