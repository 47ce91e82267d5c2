use crate::external::quote_provider::{parse_price, ExternalQuote, QuoteProvider, QuoteProviderError};
use async_trait::async_trait;
use serde::Deserialize;

const IEX_BASE_URL: &str = "https://cloud.iexapis.com/stable/stock/";

pub struct IexProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: url::Url,
}

impl IexProvider {
    pub fn new(client: reqwest::Client, api_key: String) -> Result<Self, QuoteProviderError> {
        let base_url = url::Url::parse(IEX_BASE_URL).map_err(|e| QuoteProviderError::BadResponse(e.to_string()))?;
        Ok(Self { client, api_key, base_url })
    }

    fn quote_url(&self, symbol: &str) -> Result<url::Url, QuoteProviderError> {
        // encoded so a slash in the symbol stays inside one path segment
        let mut url = self
            .base_url
            .join(&format!("{}/quote", urlencode_segment(symbol)))
            .map_err(|e| QuoteProviderError::BadResponse(e.to_string()))?;
        url.query_pairs_mut().append_pair("token", &self.api_key);
        Ok(url)
    }
}

fn urlencode_segment(symbol: &str) -> String {
    url::form_urlencoded::byte_serialize(symbol.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IexQuoteResponse {
    symbol: String,
    company_name: Option<String>,
    latest_price: Option<f64>,
}

impl IexQuoteResponse {
    fn into_quote(self) -> Result<ExternalQuote, QuoteProviderError> {
        let price = self
            .latest_price
            .ok_or_else(|| QuoteProviderError::BadResponse(format!("no latestPrice for {}", self.symbol)))?;
        let price = parse_price(&price.to_string())?;
        let name = self
            .company_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.symbol.clone());

        Ok(ExternalQuote {
            symbol: self.symbol,
            name,
            price,
        })
    }
}

#[async_trait]
impl QuoteProvider for IexProvider {
    fn name(&self) -> &'static str {
        "iex"
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<ExternalQuote, QuoteProviderError> {
        let url = self.quote_url(symbol)?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| QuoteProviderError::Network(e.to_string()))?;

        match resp.status() {
            reqwest::StatusCode::NOT_FOUND => return Err(QuoteProviderError::NotFound(symbol.to_string())),
            reqwest::StatusCode::TOO_MANY_REQUESTS | reqwest::StatusCode::PAYMENT_REQUIRED => {
                return Err(QuoteProviderError::RateLimited)
            }
            status if !status.is_success() => {
                return Err(QuoteProviderError::BadResponse(format!("status {}", status)))
            }
            _ => {}
        }

        let body = resp
            .json::<IexQuoteResponse>()
            .await
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;

        body.into_quote()
    }
}
