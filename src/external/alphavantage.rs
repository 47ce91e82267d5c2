use crate::external::quote_provider::{parse_price, ExternalQuote, QuoteProvider, QuoteProviderError};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

pub struct AlphaVantageProvider {
    client: reqwest::Client,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[derive(Debug, Deserialize)]
struct AvGlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<HashMap<String, String>>,

    // Throttled calls come back as 200 with only a "Note" (older keys)
    // or "Information" (newer keys) field.
    #[serde(rename = "Note")]
    note: Option<String>,

    #[serde(rename = "Information")]
    information: Option<String>,

    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

impl AvGlobalQuoteResponse {
    fn into_quote(self, requested: &str) -> Result<ExternalQuote, QuoteProviderError> {
        if self.note.is_some() || self.information.is_some() {
            return Err(QuoteProviderError::RateLimited);
        }

        if let Some(msg) = self.error_message {
            return Err(QuoteProviderError::BadResponse(msg));
        }

        // Unknown symbols yield an empty "Global Quote" object.
        let fields = match self.global_quote {
            Some(fields) if !fields.is_empty() => fields,
            _ => return Err(QuoteProviderError::NotFound(requested.to_string())),
        };

        let symbol = fields
            .get("01. symbol")
            .cloned()
            .unwrap_or_else(|| requested.to_string());
        let raw_price = fields
            .get("05. price")
            .ok_or_else(|| QuoteProviderError::BadResponse("missing 05. price".into()))?;

        Ok(ExternalQuote {
            // GLOBAL_QUOTE carries no company name
            name: symbol.clone(),
            symbol,
            price: parse_price(raw_price)?,
        })
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &'static str {
        "alphavantage"
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<ExternalQuote, QuoteProviderError> {
        let resp = self
            .client
            .get("https://www.alphavantage.co/query")
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| QuoteProviderError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(QuoteProviderError::RateLimited);
        }

        let body = resp
            .json::<AvGlobalQuoteResponse>()
            .await
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;

        body.into_quote(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn parse(json: &str) -> AvGlobalQuoteResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_global_quote_parsed() {
        let body = parse(
            r#"{"Global Quote":{"01. symbol":"IBM","02. open":"129.0","05. price":"129.8000","07. latest trading day":"2024-05-01"}}"#,
        );
        let quote = body.into_quote("IBM").unwrap();
        assert_eq!(quote.symbol, "IBM");
        assert_eq!(quote.name, "IBM");
        assert_eq!(quote.price, "129.80".parse::<BigDecimal>().unwrap());
    }

    #[test]
    fn test_empty_global_quote_is_not_found() {
        let body = parse(r#"{"Global Quote":{}}"#);
        assert!(matches!(body.into_quote("NOPE"), Err(QuoteProviderError::NotFound(s)) if s == "NOPE"));
    }

    #[test]
    fn test_note_means_rate_limited() {
        let body = parse(r#"{"Note":"Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute"}"#);
        assert!(matches!(body.into_quote("IBM"), Err(QuoteProviderError::RateLimited)));

        let body = parse(r#"{"Information":"rate limit reached"}"#);
        assert!(matches!(body.into_quote("IBM"), Err(QuoteProviderError::RateLimited)));
    }

    #[test]
    fn test_error_message_is_bad_response() {
        let body = parse(r#"{"Error Message":"Invalid API call."}"#);
        assert!(matches!(body.into_quote("IBM"), Err(QuoteProviderError::BadResponse(_))));
    }
}
