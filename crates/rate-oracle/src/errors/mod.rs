//! Error types for the rate oracle crate.
//!
//! Selection of the active rate source never fails: unknown, missing and
//! empty identifiers all degrade to the default source. The only errors
//! produced by the core are registry misconfigurations, which are detected
//! when a registry is built. Everything else comes from rate sources asked
//! for prices.

use thiserror::Error;

/// Errors that can occur in the rate oracle.
#[derive(Error, Debug)]
pub enum RateOracleError {
    /// A registry was built without any entries.
    #[error("Rate source registry is empty")]
    EmptyRegistry,

    /// Two registry entries share the same identifier.
    #[error("Duplicate rate source: {id}")]
    DuplicateSource {
        /// The identifier registered more than once
        id: String,
    },

    /// The designated default identifier has no registry entry.
    #[error("Default rate source not registered: {id}")]
    MissingDefault {
        /// The default identifier that was expected
        id: String,
    },

    /// A rate source returned an error while fetching prices.
    #[error("Provider error: {source_name} - {message}")]
    ProviderError {
        /// The source that returned the error
        source_name: String,
        /// The error message from the source
        message: String,
    },

    /// A rate source returned a payload that could not be interpreted.
    #[error("Invalid response from {source_name}: {message}")]
    InvalidResponse {
        /// The source that returned the payload
        source_name: String,
        /// Description of what was wrong with it
        message: String,
    },

    /// A network error occurred while communicating with a rate source.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
