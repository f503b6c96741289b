use std::sync::Arc;

use async_trait::async_trait;

use super::sources_traits::HoldingSourceTrait;
use crate::errors::Result;
use crate::holdings::{Holding, HoldingFilter, HoldingRepositoryTrait};

/// Source backed by a local collection.
pub struct CollectionSource {
    repository: Arc<dyn HoldingRepositoryTrait>,
}

impl CollectionSource {
    pub fn new(repository: Arc<dyn HoldingRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl HoldingSourceTrait for CollectionSource {
    fn name(&self) -> &str {
        self.repository.collection()
    }

    async fn fetch_holdings(&self) -> Result<Vec<Holding>> {
        self.repository.list(&HoldingFilter::new())
    }
}
