use crate::external::quote_provider::{ExternalQuote, QuoteProvider, QuoteProviderError};
use async_trait::async_trait;
use tracing::warn;

/// Tries `primary` first and falls back to `fallback` on transport, rate
/// limit or parse failures. An authoritative "unknown symbol" from the
/// primary is returned as-is.
pub struct MultiProvider {
    primary: Box<dyn QuoteProvider>,
    fallback: Box<dyn QuoteProvider>,
}

impl MultiProvider {
    pub fn new(primary: Box<dyn QuoteProvider>, fallback: Box<dyn QuoteProvider>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl QuoteProvider for MultiProvider {
    fn name(&self) -> &'static str {
        "multi"
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<ExternalQuote, QuoteProviderError> {
        match self.primary.fetch_quote(symbol).await {
            Ok(quote) => Ok(quote),
            Err(QuoteProviderError::NotFound(s)) => Err(QuoteProviderError::NotFound(s)),
            Err(e) => {
                warn!(
                    "{} failed for {}: {}, falling back to {}",
                    self.primary.name(),
                    symbol,
                    e,
                    self.fallback.name()
                );
                self.fallback.fetch_quote(symbol).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mock::MockProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FailingProvider {
        calls: Arc<AtomicUsize>,
        error: fn(&str) -> QuoteProviderError,
    }

    #[async_trait]
    impl QuoteProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn fetch_quote(&self, symbol: &str) -> Result<ExternalQuote, QuoteProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err((self.error)(symbol))
        }
    }

    #[tokio::test]
    async fn test_falls_back_on_rate_limit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = MultiProvider::new(
            Box::new(FailingProvider {
                calls: calls.clone(),
                error: |_| QuoteProviderError::RateLimited,
            }),
            Box::new(MockProvider::new()),
        );

        let quote = provider.fetch_quote("AAPL").await.unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_not_found_skips_fallback() {
        let fallback_calls = Arc::new(AtomicUsize::new(0));
        let provider = MultiProvider::new(
            Box::new(MockProvider::new()),
            Box::new(FailingProvider {
                calls: fallback_calls.clone(),
                error: |_| QuoteProviderError::Network("unreachable".into()),
            }),
        );

        let result = provider.fetch_quote("ZZZZ").await;
        assert!(matches!(result, Err(QuoteProviderError::NotFound(_))));
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }
}
