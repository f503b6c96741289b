use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};

use super::sources_traits::HoldingSourceTrait;
use crate::errors::{Error, Result};
use crate::holdings::Holding;

/// Source backed by another stocks service's `GET /stocks` endpoint.
pub struct RemoteStocksSource {
    name: String,
    url: String,
    client: Client,
}

impl RemoteStocksSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            name: name.into(),
            url: url.into(),
            client,
        }
    }

    fn unavailable(&self, message: String) -> Error {
        Error::SourceUnavailable {
            name: self.name.clone(),
            message,
        }
    }
}

#[async_trait]
impl HoldingSourceTrait for RemoteStocksSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_holdings(&self) -> Result<Vec<Holding>> {
        debug!("Fetching holdings of {} from {}", self.name, self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.unavailable(format!("request failed: {}", e)))?;

        if response.status() != StatusCode::OK {
            return Err(self.unavailable(format!("HTTP {}", response.status())));
        }

        response
            .json::<Vec<Holding>>()
            .await
            .map_err(|e| self.unavailable(format!("invalid body: {}", e)))
    }
}
