use async_trait::async_trait;
use bigdecimal::BigDecimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalQuote {
    pub symbol: String,
    pub name: String,
    pub price: BigDecimal,
}

#[derive(Debug, Error)]
pub enum QuoteProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,

    #[error("unknown symbol: {0}")]
    NotFound(String),
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Latest trade price for `symbol`, which callers pass already upper-cased.
    async fn fetch_quote(&self, symbol: &str) -> Result<ExternalQuote, QuoteProviderError>;
}

/// Providers report prices as floats or strings; both go through the
/// decimal parser so the money path never touches binary floating point.
/// The quoted precision is kept; only trade totals are rounded to cents.
pub(crate) fn parse_price(raw: &str) -> Result<BigDecimal, QuoteProviderError> {
    let price = raw
        .trim()
        .parse::<BigDecimal>()
        .map_err(|e| QuoteProviderError::Parse(format!("price '{}': {}", raw, e)))?;
    if price <= BigDecimal::from(0) {
        return Err(QuoteProviderError::BadResponse(format!("non-positive price {}", raw)));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_keeps_quoted_precision() {
        assert_eq!(parse_price("129.8000").unwrap(), "129.80".parse::<BigDecimal>().unwrap());
        assert_eq!(parse_price(" 10.006 ").unwrap(), "10.006".parse::<BigDecimal>().unwrap());
    }

    #[test]
    fn test_parse_price_keeps_sub_cent_quotes() {
        let price = parse_price("0.004").unwrap();
        assert_eq!(price, "0.004".parse::<BigDecimal>().unwrap());
        assert!(price > BigDecimal::from(0));
    }

    #[test]
    fn test_parse_price_rejects_junk_and_zero() {
        assert!(matches!(parse_price("n/a"), Err(QuoteProviderError::Parse(_))));
        assert!(matches!(parse_price("0"), Err(QuoteProviderError::BadResponse(_))));
        assert!(matches!(parse_price("-1.25"), Err(QuoteProviderError::BadResponse(_))));
    }
}
