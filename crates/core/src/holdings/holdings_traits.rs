//! Holding repository and service traits.
//!
//! These traits define the contract for holding operations without any
//! storage-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::holdings_model::{CanonicalHolding, Holding, HoldingFilter, HoldingPayload};
use crate::errors::Result;

/// Trait defining the contract for Holding repository operations.
///
/// A repository is bound to one named collection. It is the only component
/// issuing raw store operations; `NotFound` is the only domain failure it
/// produces, every store fault surfaces as `Error::Database`.
#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    /// Name of the collection this repository reads and writes.
    fn collection(&self) -> &str;

    /// Lists holdings matching `filter`. An empty filter lists them all.
    fn list(&self, filter: &HoldingFilter) -> Result<Vec<Holding>>;

    /// Retrieves a holding by id.
    ///
    /// An id the store could never have assigned is reported as `NotFound`.
    fn get_by_id(&self, holding_id: &str) -> Result<Holding>;

    /// Looks up the holding with this (already uppercased) symbol.
    fn find_by_symbol(&self, symbol: &str) -> Result<Option<Holding>>;

    /// Like `find_by_symbol`, with absence reported as `NotFound`.
    fn get_by_symbol(&self, symbol: &str) -> Result<Holding>;

    /// Inserts a holding and returns the id assigned to it.
    async fn create(&self, record: CanonicalHolding) -> Result<String>;

    /// Replaces the fields of an existing holding.
    ///
    /// Returns whether the write matched a document.
    async fn update(&self, holding_id: &str, record: CanonicalHolding) -> Result<bool>;

    /// Deletes a holding. Returns whether a document was removed.
    async fn delete(&self, holding_id: &str) -> Result<bool>;
}

/// Trait defining the contract for Holding service operations.
#[async_trait]
pub trait HoldingServiceTrait: Send + Sync {
    /// Validates and stores a new holding, returning its id.
    async fn create_holding(&self, payload: HoldingPayload) -> Result<String>;

    /// Validates and applies a full replacement, returning the holding id.
    async fn update_holding(&self, holding_id: &str, payload: HoldingPayload) -> Result<String>;

    async fn delete_holding(&self, holding_id: &str) -> Result<()>;

    fn get_holding(&self, holding_id: &str) -> Result<Holding>;

    fn list_holdings(&self, filter: &HoldingFilter) -> Result<Vec<Holding>>;
}
