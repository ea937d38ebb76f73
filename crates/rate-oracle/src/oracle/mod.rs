//! The rate oracle singleton.
//!
//! - `selection` - Resolves the configured source name against a registry
//! - `cell` - Lazily initialized, resettable holder of the oracle
//! - `rate_oracle` - The oracle instance and its process-wide accessor

mod cell;
mod rate_oracle;
mod selection;

pub use cell::{OracleState, RateOracleCell};
pub use rate_oracle::RateOracle;
pub use selection::{resolve_source, Resolution};
