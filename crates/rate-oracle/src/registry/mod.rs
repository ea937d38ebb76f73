//! Rate source registry module.
//!
//! - `source_id` - The closed set of selectable source identifiers
//! - `registry` - Validated identifier to constructor mapping

mod registry;
mod source_id;

pub use registry::{RateSourceRegistry, RegistryEntry};
pub use source_id::RateSourceId;
