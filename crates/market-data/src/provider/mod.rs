//! Price provider abstractions and implementations.
//!
//! This module contains:
//! - The `PriceProvider` trait that all providers implement
//! - Concrete provider implementations (API Ninjas)

mod traits;

pub mod api_ninjas;

pub use traits::PriceProvider;
