//! Application state shared by all handlers

use crate::api_client::ApiClient;
use afrifiscal_core::{Config, Result};

/// Application state holding configuration and the analytics client
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Client for the remote analytics API
    pub api_client: ApiClient,
}

impl AppState {
    /// Create application state from a resolved configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let api_client = ApiClient::from_config(&config.api)?;
        Ok(Self { config, api_client })
    }
}
