use std::sync::Arc;

use crate::config::Config;
use stockfolio_core::{
    documents::DocumentStoreTrait,
    holdings::{HoldingRepository, HoldingService, HoldingServiceTrait},
    portfolio::{
        CapitalGainsService, CapitalGainsServiceTrait, CollectionSource, HoldingSourceTrait,
        RemoteStocksSource, ValuationService, ValuationServiceTrait,
    },
};
use stockfolio_market_data::{ApiNinjasProvider, PriceProvider};
use stockfolio_storage_sqlite::{db, SqliteDocumentStore};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    /// Collection served under `/stocks`.
    pub collection: String,
    pub holding_service: Arc<dyn HoldingServiceTrait>,
    pub valuation_service: Arc<dyn ValuationServiceTrait>,
    pub capital_gains_service: Arc<dyn CapitalGainsServiceTrait>,
    pub db_path: String,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Builds the application state with the API Ninjas price provider.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = ApiNinjasProvider::with_endpoint(
        config.price_api_url.clone(),
        config.price_api_key.clone(),
        config.price_timeout,
    );
    if config.price_api_key.is_empty() {
        tracing::warn!("SF_PRICE_API_KEY is not set; price lookups will be rejected");
    }
    build_state_with_provider(config, Arc::new(provider)).await
}

/// Builds the application state around an arbitrary price provider.
pub async fn build_state_with_provider(
    config: &Config,
    price_provider: Arc<dyn PriceProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());
    let store: Arc<dyn DocumentStoreTrait> = Arc::new(SqliteDocumentStore::new(pool, writer));

    let holding_repository = Arc::new(HoldingRepository::new(
        store.clone(),
        config.collection_name.clone(),
    ));
    let holding_service = Arc::new(HoldingService::new(holding_repository));

    tracing::info!(
        "Pricing through {} with {} lookups in flight",
        price_provider.id(),
        config.quote_concurrency
    );
    let valuation_service: Arc<dyn ValuationServiceTrait> = Arc::new(
        ValuationService::with_concurrency(price_provider, config.quote_concurrency),
    );

    let sources: Vec<Arc<dyn HoldingSourceTrait>> = config
        .portfolio_sources
        .iter()
        .map(|source| -> Arc<dyn HoldingSourceTrait> {
            match &source.url {
                Some(url) => Arc::new(RemoteStocksSource::new(
                    source.name.clone(),
                    url.clone(),
                    config.request_timeout,
                )),
                None => Arc::new(CollectionSource::new(Arc::new(HoldingRepository::new(
                    store.clone(),
                    source.name.clone(),
                )))),
            }
        })
        .collect();
    let capital_gains_service = Arc::new(CapitalGainsService::new(
        sources,
        valuation_service.clone(),
    ));
    tracing::info!(
        "Capital gains sources: {:?}",
        capital_gains_service.source_names()
    );

    Ok(Arc::new(AppState {
        collection: config.collection_name.clone(),
        holding_service,
        valuation_service,
        capital_gains_service,
        db_path,
    }))
}
