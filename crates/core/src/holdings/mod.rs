//! Holdings module - domain models, validation, persistence and services.

mod holdings_constants;
mod holdings_model;
mod holdings_repository;
mod holdings_service;
mod holdings_traits;
mod holdings_validator;

#[cfg(test)]
mod holdings_model_tests;

// Re-export the public interface
pub use holdings_constants::*;
pub use holdings_model::{
    normalize_price, CanonicalHolding, Holding, HoldingFilter, HoldingPayload,
};
pub use holdings_repository::HoldingRepository;
pub use holdings_service::HoldingService;
pub use holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};
pub use holdings_validator::{
    parse_purchase_date, parse_purchase_price, parse_shares, HoldingValidator, ValidationMode,
};
