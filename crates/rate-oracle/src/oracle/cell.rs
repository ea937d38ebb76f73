//! Lazily initialized, resettable oracle holder.
//!
//! The holder moves through three states:
//!
//! - **Uninitialized**: no source has been selected yet.
//! - **Resolving**: the environment is being read and the source built.
//! - **Ready**: the oracle is cached and handed out unchanged.
//!
//! Resolution and reset both run under the same mutex, so concurrent first
//! accesses construct exactly one source and a reset can never interleave
//! with an in-flight resolution.

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};

use super::{resolve_source, RateOracle};
use crate::config::{process_env, EnvLookup, OracleConfig};
use crate::registry::RateSourceRegistry;

/// Observable lifecycle state of a [`RateOracleCell`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OracleState {
    Uninitialized,
    Resolving,
    Ready,
}

impl std::fmt::Display for OracleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Uninitialized"),
            Self::Resolving => write!(f, "Resolving"),
            Self::Ready => write!(f, "Ready"),
        }
    }
}

enum Slot {
    Uninitialized,
    Resolving,
    Ready(Arc<RateOracle>),
}

/// Holder of one [`RateOracle`] per lifetime.
///
/// The process-wide instance behind [`RateOracle::get_instance`] is a
/// `RateOracleCell` reading the real environment. Applications and tests
/// can own their own cell with a custom registry or environment lookup.
pub struct RateOracleCell {
    registry: RateSourceRegistry,
    env: EnvLookup,
    slot: Mutex<Slot>,
}

impl RateOracleCell {
    pub fn new(registry: RateSourceRegistry, env: EnvLookup) -> Self {
        Self {
            registry,
            env,
            slot: Mutex::new(Slot::Uninitialized),
        }
    }

    /// Cell over the built-in registry and the process environment.
    pub fn from_env() -> Self {
        Self::new(RateSourceRegistry::builtin().clone(), process_env())
    }

    /// Lock the slot, recovering from poison if necessary.
    ///
    /// A poisoned slot means a source constructor panicked mid-resolution.
    /// The slot is then left `Resolving` and the next access resolves again.
    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|poisoned| {
            warn!("Rate oracle mutex was poisoned, recovering");
            self.slot.clear_poison();
            poisoned.into_inner()
        })
    }

    /// Return the cached oracle, resolving it first if needed.
    ///
    /// Once ready, the environment is not consulted again until
    /// [`reset`](Self::reset).
    pub fn get_instance(&self) -> Arc<RateOracle> {
        let mut slot = self.lock_slot();
        if let Slot::Ready(oracle) = &*slot {
            return Arc::clone(oracle);
        }

        debug!("Rate oracle resolving source");
        *slot = Slot::Resolving;

        let config = OracleConfig::from_lookup(&self.env);
        let resolution = resolve_source(&self.registry, config.source_key.as_deref());
        let source = (resolution.constructor)();

        info!(
            "Rate oracle using source '{}' (quote token {})",
            resolution.id, config.quote_token
        );

        let oracle = Arc::new(RateOracle::new(
            source,
            resolution.id,
            resolution.defaulted,
            config.quote_token,
        ));
        *slot = Slot::Ready(Arc::clone(&oracle));
        oracle
    }

    /// Drop the cached oracle and return to `Uninitialized`.
    pub fn reset(&self) {
        let mut slot = self.lock_slot();
        *slot = Slot::Uninitialized;
        debug!("Rate oracle reset");
    }

    pub fn state(&self) -> OracleState {
        match &*self.lock_slot() {
            Slot::Uninitialized => OracleState::Uninitialized,
            Slot::Resolving => OracleState::Resolving,
            Slot::Ready(_) => OracleState::Ready,
        }
    }

    pub fn registry(&self) -> &RateSourceRegistry {
        &self.registry
    }
}
