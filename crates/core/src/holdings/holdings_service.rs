use log::{debug, warn};
use std::sync::Arc;

use super::holdings_model::{Holding, HoldingFilter, HoldingPayload};
use super::holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};
use super::holdings_validator::{HoldingValidator, ValidationMode};
use crate::errors::{Error, Result};

/// Service for managing the holdings of one collection
pub struct HoldingService {
    repository: Arc<dyn HoldingRepositoryTrait>,
    validator: HoldingValidator,
}

impl HoldingService {
    /// Creates a new HoldingService instance
    pub fn new(repository: Arc<dyn HoldingRepositoryTrait>) -> Self {
        Self {
            validator: HoldingValidator::new(repository.clone()),
            repository,
        }
    }
}

#[async_trait::async_trait]
impl HoldingServiceTrait for HoldingService {
    async fn create_holding(&self, payload: HoldingPayload) -> Result<String> {
        let record = self
            .validator
            .prepare_and_validate(&payload, ValidationMode::Create)?;
        debug!(
            "Creating holding {} in {}",
            record.symbol,
            self.repository.collection()
        );
        self.repository.create(record).await
    }

    async fn update_holding(&self, holding_id: &str, payload: HoldingPayload) -> Result<String> {
        let record = self.validator.prepare_and_validate(
            &payload,
            ValidationMode::Update {
                existing_id: holding_id,
            },
        )?;
        if !self.repository.update(holding_id, record).await? {
            // Removed between the existence check and the write
            warn!("Holding {} vanished before its update was applied", holding_id);
            return Err(Error::NotFound(format!("Holding {}", holding_id)));
        }
        Ok(holding_id.to_string())
    }

    async fn delete_holding(&self, holding_id: &str) -> Result<()> {
        if !self.repository.delete(holding_id).await? {
            return Err(Error::NotFound(format!("Holding {}", holding_id)));
        }
        Ok(())
    }

    fn get_holding(&self, holding_id: &str) -> Result<Holding> {
        self.repository.get_by_id(holding_id)
    }

    fn list_holdings(&self, filter: &HoldingFilter) -> Result<Vec<Holding>> {
        self.repository.list(filter)
    }
}
