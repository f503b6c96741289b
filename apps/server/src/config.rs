use std::{net::SocketAddr, time::Duration};

use anyhow::{bail, Context};
use stockfolio_core::constants::{DEFAULT_COLLECTION_NAME, DEFAULT_QUOTE_CONCURRENCY};
use stockfolio_market_data::provider::api_ninjas::DEFAULT_BASE_URL;

/// A holding source for capital gains: a local collection, or another
/// stocks service reachable at `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub collection_name: String,
    pub portfolio_sources: Vec<SourceConfig>,
    pub price_api_url: String,
    pub price_api_key: String,
    pub price_timeout: Duration,
    pub quote_concurrency: usize,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub log_format: String,
}

impl Config {
    /// Reads the configuration from the process environment, after loading
    /// `.env` when present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`; unset keys take defaults and
    /// unparseable numbers fall back to them.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let millis = |key: &str, default: u64| {
            lookup(key)
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let listen_addr: SocketAddr = var("SF_LISTEN_ADDR", "0.0.0.0:8000")
            .parse()
            .context("Invalid SF_LISTEN_ADDR")?;
        let portfolio_sources = parse_sources(&var("SF_PORTFOLIO_SOURCES", "stocks1,stocks2"))
            .context("Invalid SF_PORTFOLIO_SOURCES")?;
        let quote_concurrency = lookup("SF_QUOTE_CONCURRENCY")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_QUOTE_CONCURRENCY);

        Ok(Self {
            listen_addr,
            db_path: var("SF_DB_PATH", "./db/stocks.db"),
            collection_name: var("COLLECTION_NAME", DEFAULT_COLLECTION_NAME),
            portfolio_sources,
            price_api_url: var("SF_PRICE_API_URL", DEFAULT_BASE_URL),
            price_api_key: var("SF_PRICE_API_KEY", ""),
            price_timeout: Duration::from_millis(millis("SF_PRICE_TIMEOUT_MS", 30000)),
            quote_concurrency,
            cors_allow: var("SF_CORS_ALLOW_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            request_timeout: Duration::from_millis(millis("SF_REQUEST_TIMEOUT_MS", 30000)),
            log_format: var("SF_LOG_FORMAT", "text"),
        })
    }
}

/// Parses `name` or `name=url` entries separated by commas.
pub fn parse_sources(raw: &str) -> anyhow::Result<Vec<SourceConfig>> {
    let mut sources: Vec<SourceConfig> = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, url) = match entry.split_once('=') {
            Some((name, url)) => (name.trim(), Some(url.trim())),
            None => (entry, None),
        };
        if name.is_empty() {
            bail!("source entry '{}' has no name", entry);
        }
        if url.is_some_and(|url| !url.starts_with("http://") && !url.starts_with("https://")) {
            bail!("source '{}' needs an http(s) URL", name);
        }
        if sources.iter().any(|source| source.name == name) {
            bail!("source '{}' is listed twice", name);
        }
        sources.push(SourceConfig {
            name: name.to_string(),
            url: url.map(str::to_string),
        });
    }
    Ok(sources)
}
