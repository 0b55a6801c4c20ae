//! Configuration loading from environment.

use std::env;
use std::time::Duration;

const DEFAULT_ORDER_SERVICE_URL: &str = "http://localhost:8300/order-service/api/orders";
const DEFAULT_ORDER_SERVICE_TIMEOUT_MS: u64 = 5000;

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Base URL of the Order service's orders resource.
    pub order_service_url: String,
    pub order_service_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()?;

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let order_service_url = lookup("ORDER_SERVICE_URL")
            .unwrap_or_else(|| DEFAULT_ORDER_SERVICE_URL.to_string());

        let timeout_ms = match lookup("ORDER_SERVICE_TIMEOUT_MS") {
            Some(raw) => raw.parse().map_err(|e| {
                anyhow::anyhow!("ORDER_SERVICE_TIMEOUT_MS must be milliseconds: {}", e)
            })?,
            None => DEFAULT_ORDER_SERVICE_TIMEOUT_MS,
        };

        Ok(Self {
            port,
            database_url,
            order_service_url,
            order_service_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
