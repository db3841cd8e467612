use std::{net::SocketAddr, sync::Arc};

use contextor::AskPipeline;
use thiserror::Error;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AskPipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<AskPipeline>) -> Self {
        Self { pipeline }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var} '{value}': {reason}")]
    InvalidAddress {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub address: SocketAddr,
}

impl ApiConfig {
    pub const DEFAULT_ADDRESS: &'static str = "127.0.0.1:3000";

    /// Load from `API_ADDRESS`, falling back to [`Self::DEFAULT_ADDRESS`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("API_ADDRESS").unwrap_or_else(|_| Self::DEFAULT_ADDRESS.into());
        Self::parse(&raw)
    }

    fn parse(raw: &str) -> Result<Self, ConfigError> {
        let address = raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidAddress {
                var: "API_ADDRESS",
                value: raw.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { address })
    }
}
