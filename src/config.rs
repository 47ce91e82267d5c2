use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Which market-data source backs `/quote`, `/buy`, `/sell` and the portfolio page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Iex,
    AlphaVantage,
    Multi,
    Mock,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "iex" => Ok(ProviderKind::Iex),
            "alphavantage" => Ok(ProviderKind::AlphaVantage),
            "multi" => Ok(ProviderKind::Multi),
            "mock" => Ok(ProviderKind::Mock),
            _ => Err(ConfigError::Invalid {
                name: "PRICE_PROVIDER",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub price_provider: ProviderKind,
    pub iex_api_key: Option<String>,
    pub alphavantage_api_key: Option<String>,
    pub quote_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let database_url = non_empty("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let session_secret =
            non_empty("SESSION_SECRET").ok_or(ConfigError::Missing("SESSION_SECRET"))?;

        let bind_addr = parse_or(non_empty("BIND_ADDR"), "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?;
        let db_max_connections = parse_or(non_empty("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 10u32)?;
        let session_ttl_hours = parse_or(non_empty("SESSION_TTL_HOURS"), "SESSION_TTL_HOURS", 24i64)?;
        if session_ttl_hours <= 0 {
            return Err(ConfigError::Invalid {
                name: "SESSION_TTL_HOURS",
                value: session_ttl_hours.to_string(),
            });
        }
        let quote_timeout_secs = parse_or(non_empty("QUOTE_TIMEOUT_SECS"), "QUOTE_TIMEOUT_SECS", 10u64)?;

        let price_provider = match non_empty("PRICE_PROVIDER") {
            Some(v) => v.parse()?,
            None => ProviderKind::Iex,
        };

        let iex_api_key = non_empty("API_KEY");
        let alphavantage_api_key = non_empty("ALPHAVANTAGE_API_KEY");

        match price_provider {
            ProviderKind::Iex if iex_api_key.is_none() => return Err(ConfigError::Missing("API_KEY")),
            ProviderKind::AlphaVantage if alphavantage_api_key.is_none() => {
                return Err(ConfigError::Missing("ALPHAVANTAGE_API_KEY"))
            }
            ProviderKind::Multi => {
                if iex_api_key.is_none() {
                    return Err(ConfigError::Missing("API_KEY"));
                }
                if alphavantage_api_key.is_none() {
                    return Err(ConfigError::Missing("ALPHAVANTAGE_API_KEY"));
                }
            }
            _ => {}
        }

        Ok(Self {
            database_url,
            bind_addr,
            db_max_connections,
            session_secret,
            session_ttl_hours,
            price_provider,
            iex_api_key,
            alphavantage_api_key,
            quote_timeout: Duration::from_secs(quote_timeout_secs),
        })
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
