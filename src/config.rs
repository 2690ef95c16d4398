use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;
use crate::error::{AppError, Result};

pub const DEFAULT_BASE_URL: &str = "https://www.nps.gov";
pub const DEFAULT_RADIUS_URL: &str = "http://www.mapquestapi.com/search/v2/radius";
pub const DEFAULT_CACHE_FILE: &str = "national_park_cache.json";

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub radius_url: String,
    pub cache_path: PathBuf,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("MAPQUEST_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::ConfigError("MAPQUEST_API_KEY is not set".to_string()))?;

        let base_url = lookup("NPS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let radius_url = lookup("MAPQUEST_RADIUS_URL").unwrap_or_else(|| DEFAULT_RADIUS_URL.to_string());
        let cache_path = lookup("NPS_CACHE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE));

        let level = lookup("NPS_LOG").unwrap_or_else(|| "info".to_string());
        let log_level = LevelFilter::from_str(&level)
            .map_err(|e| AppError::ConfigError(format!("Invalid NPS_LOG '{}': {}", level, e)))?;

        Ok(Config {
            api_key,
            // Listing URLs are built as base + "/" + href, keep the root bare
            base_url: base_url.trim_end_matches('/').to_string(),
            radius_url,
            cache_path,
            log_level,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("radius_url", &self.radius_url)
            .field("cache_path", &self.cache_path)
            .field("log_level", &self.log_level)
            .finish()
    }
}
