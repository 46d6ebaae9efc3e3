//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::ExchangeRates;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Path of the persisted JSON state file
    pub data_file: PathBuf,

    /// NGN per USD
    pub usd_to_ngn: f64,

    /// USD per DavCoin
    pub dav_coin_value_usd: f64,

    /// Payment provider settings
    pub provider: ProviderConfig,

    /// Withdrawals allowed per caller within one window
    pub withdraw_rate_limit: u32,

    /// Length of the withdrawal rate limit window
    pub withdraw_rate_window: Duration,
}

/// Outbound payment provider settings
#[derive(Clone)]
pub struct ProviderConfig {
    pub transfer_url: String,
    pub api_key: String,
    pub secret_key: String,
    pub timeout: Duration,
}

// Keys stay out of logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("transfer_url", &self.transfer_url)
            .field("api_key", &"[REDACTED]")
            .field("secret_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let data_file = env::var("DATA_FILE")
            .unwrap_or_else(|_| "data.json".to_string())
            .into();

        let usd_to_ngn = required_rate("USD_TO_NGN")?;
        let dav_coin_value_usd = required_rate("DAVCOIN_VALUE_USD")?;

        let timeout_secs: u64 = env::var("PROVIDER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PROVIDER_TIMEOUT_SECS"))?;

        let provider = ProviderConfig {
            transfer_url: required("PROVIDER_TRANSFER_URL")?,
            api_key: required("PROVIDER_API_KEY")?,
            secret_key: required("PROVIDER_SECRET_KEY")?,
            timeout: Duration::from_secs(timeout_secs),
        };

        let withdraw_rate_limit = env::var("WITHDRAW_RATE_LIMIT")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("WITHDRAW_RATE_LIMIT"))?;

        let window_secs: u64 = env::var("WITHDRAW_RATE_WINDOW_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("WITHDRAW_RATE_WINDOW_SECS"))?;

        Ok(Self {
            host,
            port,
            data_file,
            usd_to_ngn,
            dav_coin_value_usd,
            provider,
            withdraw_rate_limit,
            withdraw_rate_window: Duration::from_secs(window_secs),
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnv(key))
}

fn required_rate(key: &'static str) -> Result<f64, ConfigError> {
    parse_rate(key, &required(key)?)
}

/// Rates must be finite and strictly positive
fn parse_rate(key: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|rate| ExchangeRates::is_valid_rate(*rate))
        .ok_or(ConfigError::InvalidValue(key))
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
