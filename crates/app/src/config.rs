//! Client Config

use std::time::Duration;

use clap::Args;

use crate::client::{ApiError, HttpOrdersApi};

/// Order service connection settings for client commands.
#[derive(Debug, Args)]
pub struct ClientConfig {
    /// Base URL of the order service
    #[arg(long, env = "BREWLINE_API_URL", default_value = "http://127.0.0.1:3001")]
    pub api_url: String,

    /// Seconds between order status refreshes while tracking
    #[arg(long, env = "BREWLINE_POLL_INTERVAL_SECS", default_value_t = 10_u64)]
    pub poll_interval_secs: u64,
}

impl ClientConfig {
    /// Build an HTTP client for the configured service.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if `api_url` cannot be used.
    pub fn orders_api(&self) -> Result<HttpOrdersApi, ApiError> {
        HttpOrdersApi::new(&self.api_url)
    }

    /// Tracking interval, never shorter than one second.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

/// Logging settings for the CLI.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}
