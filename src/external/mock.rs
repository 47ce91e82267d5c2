use crate::external::quote_provider::{parse_price, ExternalQuote, QuoteProvider, QuoteProviderError};
use async_trait::async_trait;

// Fixed book used for local runs (PRICE_PROVIDER=mock) and tests.
const MOCK_BOOK: &[(&str, &str, &str)] = &[
    ("AAPL", "Apple Inc.", "150.00"),
    ("AMZN", "Amazon.com, Inc.", "135.50"),
    ("GOOG", "Alphabet Inc.", "140.25"),
    ("MSFT", "Microsoft Corporation", "330.10"),
    ("NFLX", "Netflix, Inc.", "420.00"),
    ("TSLA", "Tesla, Inc.", "250.75"),
];

#[derive(Debug, Default, Clone)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QuoteProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<ExternalQuote, QuoteProviderError> {
        let (sym, name, price) = MOCK_BOOK
            .iter()
            .find(|(s, _, _)| *s == symbol)
            .ok_or_else(|| QuoteProviderError::NotFound(symbol.to_string()))?;

        Ok(ExternalQuote {
            symbol: sym.to_string(),
            name: name.to_string(),
            price: parse_price(price)?,
        })
    }
}
