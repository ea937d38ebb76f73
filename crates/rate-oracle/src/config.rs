//! Oracle configuration read from the environment.

use std::sync::Arc;

/// Environment variable naming the rate source to use.
pub const RATE_ORACLE_ENV_VAR: &str = "MY_RATE_ORACLE";

/// Environment variable overriding the quote token.
pub const QUOTE_TOKEN_ENV_VAR: &str = "MY_RATE_ORACLE_QUOTE_TOKEN";

pub const DEFAULT_QUOTE_TOKEN: &str = "USDT";

/// Reads one environment variable by name.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Lookup backed by the process environment.
///
/// Reads variables as they are; loading a `.env` file is left to the caller.
pub fn process_env() -> EnvLookup {
    Arc::new(|name: &str| std::env::var(name).ok())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleConfig {
    /// Raw `MY_RATE_ORACLE` value. `None` when unset.
    pub source_key: Option<String>,
    pub quote_token: String,
}

impl OracleConfig {
    /// Load `.env` into the process environment if present, then read it.
    ///
    /// Variables already set in the process take precedence over the file.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(&process_env())
    }

    pub fn from_lookup(lookup: &EnvLookup) -> Self {
        let source_key = lookup(RATE_ORACLE_ENV_VAR);
        let quote_token = lookup(QUOTE_TOKEN_ENV_VAR)
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_QUOTE_TOKEN.to_string());

        Self {
            source_key,
            quote_token,
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            source_key: None,
            quote_token: DEFAULT_QUOTE_TOKEN.to_string(),
        }
    }
}
