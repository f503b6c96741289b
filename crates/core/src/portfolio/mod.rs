//! Portfolio module - valuation of holdings against live prices.

pub mod capital_gains;
pub mod sources;
pub mod valuation;

pub use capital_gains::*;
pub use sources::*;
pub use valuation::*;
