//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching a live price.
///
/// None of these are retried: callers treat every variant as the price
/// being unavailable for the requested symbol.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider answered but had no price for the symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider answered with a non-success HTTP status.
    #[error("Provider {provider} responded with HTTP {status}")]
    HttpStatus {
        /// The provider that returned the status
        provider: String,
        /// The HTTP status code
        status: u16,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider returned a body we could not interpret.
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse {
        /// The provider that returned the body
        provider: String,
        /// What was wrong with it
        message: String,
    },

    /// A provider-specific failure (transport, TLS, request building).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that failed
        provider: String,
        /// The error message
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// HTTP status reported by the provider, when the failure carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
