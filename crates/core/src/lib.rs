//! Stockfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for Stockfolio: validating and
//! persisting stock holdings, and valuing them against live prices.
//! It is storage-agnostic and defines the `DocumentStoreTrait` that is
//! implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod documents;
pub mod errors;
pub mod holdings;
pub mod portfolio;

#[cfg(test)]
pub(crate) mod testing;

// Re-export common types from the holdings and portfolio modules
pub use holdings::*;
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
