use async_trait::async_trait;

use crate::errors::Result;
use crate::holdings::Holding;

/// A named set of holdings that can be fetched as a whole.
#[async_trait]
pub trait HoldingSourceTrait: Send + Sync {
    /// Portfolio name callers select this source by.
    fn name(&self) -> &str;

    async fn fetch_holdings(&self) -> Result<Vec<Holding>>;
}
