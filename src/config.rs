use std::env;
use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid listen address {0}")]
    InvalidAddr(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_ms: u64,
    pub body_limit_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let base_url = lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_ms = lookup("UPSTREAM_TIMEOUT_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(60_000);

        // Matches the usual JSON body parser default of 100 KiB.
        let body_limit_bytes = lookup("BODY_LIMIT_BYTES")
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(100 * 1024);

        Ok(Self {
            host,
            port,
            api_key,
            base_url,
            model,
            timeout_ms,
            body_limit_bytes,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddr(raw))
    }
}
