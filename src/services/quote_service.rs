use tracing::{info, warn};

use crate::errors::AppError;
use crate::external::quote_provider::{QuoteProvider, QuoteProviderError};
use crate::models::Quote;

const MAX_SYMBOL_LEN: usize = 12;

/// Trims and upper-cases a submitted symbol so holdings aggregate
/// regardless of how the user typed it.
pub fn normalize_symbol(raw: Option<&str>) -> Result<String, AppError> {
    let symbol = raw.map(str::trim).unwrap_or_default();
    if symbol.is_empty() {
        return Err(AppError::Validation("must provide symbol".into()));
    }
    let starts_alphanumeric = symbol.chars().next().map_or(false, |c| c.is_ascii_alphanumeric());
    if symbol.len() > MAX_SYMBOL_LEN
        || !starts_alphanumeric
        || !symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(AppError::InvalidSymbol);
    }
    Ok(symbol.to_ascii_uppercase())
}

/// Every provider failure means "no quote" to the user; only the log
/// tells a transport problem apart from an unknown symbol.
pub async fn lookup(provider: &dyn QuoteProvider, symbol: &str) -> Result<Quote, AppError> {
    match provider.fetch_quote(symbol).await {
        Ok(q) => {
            info!("Quoted {} at {} via {}", q.symbol, q.price, provider.name());
            Ok(Quote {
                symbol: q.symbol.to_ascii_uppercase(),
                name: q.name,
                price: q.price,
            })
        }
        Err(QuoteProviderError::NotFound(_)) => {
            info!("Unknown symbol {}", symbol);
            Err(AppError::InvalidSymbol)
        }
        Err(e) => {
            warn!("Quote lookup for {} via {} failed: {}", symbol, provider.name(), e);
            Err(AppError::InvalidSymbol)
        }
    }
}
