// Configuration - Environment variables

use std::env;

/// Application configuration loaded from environment
#[derive(Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Path of the JSON store snapshot
    pub store_path: String,
    /// Log file path
    pub log_file: String,
    /// Base URL of the upstream property-data API (valuation, council news,
    /// bin collection, insights)
    pub property_data_api_url: Option<String>,
    /// Gemini API key for email extraction
    pub gemini_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            store_path: env::var("STORE_PATH").unwrap_or_else(|_| "property-desk.json".to_string()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "/tmp/property-desk.log".to_string()),
            property_data_api_url: env::var("PROPERTY_DATA_API_URL").ok(),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
        }
    }

    /// Validate that required configuration is present
    pub fn validate(&self) -> Result<(), String> {
        if self.property_data_api_url.is_none() {
            tracing::warn!(
                "PROPERTY_DATA_API_URL not set - awareness lookups will return errors"
            );
        }
        if self.gemini_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set - email parsing will use heuristics only");
        }
        Ok(())
    }
}
