//! Stockfolio Market Data Crate
//!
//! Provider-agnostic live price lookups for the Stockfolio application.
//!
//! The core crate only knows about the [`PriceProvider`] trait: given a
//! ticker symbol it returns the current price or a [`MarketDataError`].
//! Concrete providers live under [`provider`].
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! | valuation (core) | --> |  PriceProvider   | --> |  HTTP price API  |
//! +------------------+     +------------------+     +------------------+
//! ```

pub mod errors;
pub mod provider;

pub use errors::MarketDataError;
pub use provider::api_ninjas::ApiNinjasProvider;
pub use provider::PriceProvider;
