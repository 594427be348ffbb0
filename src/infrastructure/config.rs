//! Application configuration

use std::env;
use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub host: IpAddr,
    /// HTTP server port
    pub port: u16,

    /// Oracle API base URL (OpenAI-compatible, including the `/v1` prefix)
    pub oracle_base_url: String,
    /// Model used for every decision
    pub oracle_model: String,
    /// Bearer token, omitted from requests when unset
    pub oracle_api_key: Option<String>,
    /// Transport timeout for a single oracle call
    pub oracle_timeout_secs: u64,
    /// Sampling temperature, server default when unset
    pub oracle_temperature: Option<f32>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("BRAIN_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string())
                .parse()
                .context("BRAIN_HOST must be an IP address")?,
            port: env::var("BRAIN_PORT")
                .unwrap_or_else(|_| "9420".to_string())
                .parse()
                .context("BRAIN_PORT must be a valid port number")?,

            oracle_base_url: env::var("ORACLE_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            oracle_model: env::var("ORACLE_MODEL").unwrap_or_else(|_| "gpt-5-mini".to_string()),
            oracle_api_key: env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            oracle_timeout_secs: env::var("ORACLE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .context("ORACLE_TIMEOUT_SECS must be a whole number of seconds")?,
            oracle_temperature: env::var("ORACLE_TEMPERATURE")
                .ok()
                .map(|t| t.parse())
                .transpose()
                .context("ORACLE_TEMPERATURE must be a number")?,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 9420,
            oracle_base_url: "https://api.openai.com/v1".to_string(),
            oracle_model: "gpt-5-mini".to_string(),
            oracle_api_key: None,
            oracle_timeout_secs: 120,
            oracle_temperature: None,
        }
    }
}
