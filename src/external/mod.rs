pub mod alphavantage;
pub mod iex;
pub mod mock;
pub mod multi_provider;
pub mod quote_provider;

use std::sync::Arc;

use tracing::info;

use crate::config::{Config, ConfigError, ProviderKind};
use alphavantage::AlphaVantageProvider;
use iex::IexProvider;
use mock::MockProvider;
use multi_provider::MultiProvider;
use quote_provider::{QuoteProvider, QuoteProviderError};

/// Builds the provider selected by `PRICE_PROVIDER`. Keys were checked by
/// `Config::from_env`, so a missing one here is still reported, not panicked on.
pub fn build_provider(config: &Config) -> Result<Arc<dyn QuoteProvider>, QuoteProviderError> {
    let client = reqwest::Client::builder()
        .timeout(config.quote_timeout)
        .build()
        .map_err(|e| QuoteProviderError::Network(e.to_string()))?;

    let iex = || -> Result<IexProvider, QuoteProviderError> {
        let key = config
            .iex_api_key
            .clone()
            .ok_or_else(|| QuoteProviderError::BadResponse(ConfigError::Missing("API_KEY").to_string()))?;
        IexProvider::new(client.clone(), key)
    };
    let alphavantage = || -> Result<AlphaVantageProvider, QuoteProviderError> {
        let key = config.alphavantage_api_key.clone().ok_or_else(|| {
            QuoteProviderError::BadResponse(ConfigError::Missing("ALPHAVANTAGE_API_KEY").to_string())
        })?;
        Ok(AlphaVantageProvider::new(client.clone(), key))
    };

    let provider: Arc<dyn QuoteProvider> = match config.price_provider {
        ProviderKind::Iex => Arc::new(iex()?),
        ProviderKind::AlphaVantage => Arc::new(alphavantage()?),
        ProviderKind::Multi => Arc::new(MultiProvider::new(Box::new(iex()?), Box::new(alphavantage()?))),
        ProviderKind::Mock => Arc::new(MockProvider::new()),
    };

    info!("Using quote provider: {}", provider.name());
    Ok(provider)
}
