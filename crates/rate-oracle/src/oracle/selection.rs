//! Source selection.
//!
//! A missing variable, an empty value and an unknown name all resolve to the
//! registry default. The three cases select the same source; only the log
//! line differs.

use log::{debug, warn};

use crate::config::RATE_ORACLE_ENV_VAR;
use crate::registry::{RateSourceId, RateSourceRegistry, RegistryEntry};
use crate::source::SourceConstructor;

/// Outcome of resolving a configured source name.
#[derive(Clone, Copy, Debug)]
pub struct Resolution {
    pub id: RateSourceId,
    pub constructor: SourceConstructor,
    /// True when the configured name could not be used.
    pub defaulted: bool,
}

impl Resolution {
    fn matched(entry: &RegistryEntry) -> Self {
        Self {
            id: entry.id,
            constructor: entry.constructor,
            defaulted: false,
        }
    }

    fn fallback(entry: &RegistryEntry) -> Self {
        Self {
            id: entry.id,
            constructor: entry.constructor,
            defaulted: true,
        }
    }
}

/// Resolve a raw `MY_RATE_ORACLE` value against `registry`.
pub fn resolve_source(registry: &RateSourceRegistry, raw: Option<&str>) -> Resolution {
    let key = raw.unwrap_or_default();

    if key.is_empty() {
        debug!(
            "{} not set, using default rate source '{}'",
            RATE_ORACLE_ENV_VAR,
            registry.default_id()
        );
        return Resolution::fallback(registry.default_entry());
    }

    match registry.entry(key) {
        Some(entry) => Resolution::matched(entry),
        None => {
            warn!(
                "Unknown rate source '{}' in {}, falling back to '{}'",
                key,
                RATE_ORACLE_ENV_VAR,
                registry.default_id()
            );
            Resolution::fallback(registry.default_entry())
        }
    }
}
