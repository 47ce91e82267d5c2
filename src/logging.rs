use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{0}'")]
    Filter(String),
    #[error("invalid LOKI_URL: {0}")]
    LokiUrl(String),
    #[error("failed to build loki layer: {0}")]
    Loki(String),
    #[error("subscriber already installed: {0}")]
    Init(String),
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub loki_url: Option<String>,
    pub service_name: String,
    pub environment: String,
    pub log_level: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            loki_url: std::env::var("LOKI_URL").ok().filter(|v| !v.trim().is_empty()),
            service_name: std::env::var("SERVICE_NAME").unwrap_or_else(|_| "finance".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// `LOKI_URL` when it is configured but cannot be used by this build.
    fn ignored_loki_url(&self) -> Option<&str> {
        if cfg!(feature = "loki") {
            None
        } else {
            self.loki_url.as_deref()
        }
    }

    fn filter(&self) -> Result<EnvFilter, LoggingError> {
        EnvFilter::try_new(&self.log_level).map_err(|_| LoggingError::Filter(self.log_level.clone()))
    }
}

/// Installs the global subscriber. Ships to Loki as well when the `loki`
/// feature is compiled in and `LOKI_URL` is set.
pub fn init_logging(config: LoggingConfig) -> Result<(), LoggingError> {
    #[cfg(feature = "loki")]
    {
        if let Some(loki_url) = config.loki_url.clone() {
            return init_with_loki(&config, &loki_url);
        }
    }

    tracing_subscriber::registry()
        .with(config.filter()?)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::info!(service = %config.service_name, env = %config.environment, "console logging initialized");
    if let Some(ignored) = config.ignored_loki_url() {
        tracing::warn!(loki = %ignored, "LOKI_URL is set but this build has no loki feature");
    }
    Ok(())
}

#[cfg(feature = "loki")]
fn init_with_loki(config: &LoggingConfig, loki_url: &str) -> Result<(), LoggingError> {
    let url = url::Url::parse(loki_url).map_err(|e| LoggingError::LokiUrl(e.to_string()))?;

    let (loki_layer, task) = tracing_loki::builder()
        .label("service", &config.service_name)
        .and_then(|b| b.label("environment", &config.environment))
        .and_then(|b| b.build_url(url))
        .map_err(|e| LoggingError::Loki(e.to_string()))?;

    tokio::spawn(task);

    tracing_subscriber::registry()
        .with(config.filter()?)
        .with(tracing_subscriber::fmt::layer())
        .with(loki_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::info!(loki = %loki_url, "loki logging initialized");
    Ok(())
}
