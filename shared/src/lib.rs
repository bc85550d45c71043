//! Diabetes Risk Shared Library
//!
//! This crate contains the domain types and pure calculations used by the
//! prediction client, its terminal front-end and the WASM module.

pub mod errors;
pub mod health_metrics;
pub mod pagination;
pub mod recommendations;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use pagination::Pager;
pub use types::*;
pub use validation::ValidationError;
