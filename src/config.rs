use std::{env, str::FromStr};

use dotenvy::dotenv;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::errors::ConfigError;

// Result type for configuration functions
type ConfigResult<T> = Result<T, ConfigError>;

// Application-specific configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
    pub environment: Environment,
    pub log_level: String,
}

// Shortener-specific configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ShortenerConfig {
    /// Maximum number of rows accepted in one form batch
    pub max_batch_rows: usize,
    /// Length of auto-generated shortcodes
    pub code_length: usize,
    /// Validity window applied when a row leaves the field blank, in minutes
    pub default_validity_minutes: i64,
    /// Base URL the display links are joined onto
    pub base_url: String,
}

// Remote log endpoint configuration; both values optional, the client is
// disabled when the URL is missing
#[derive(Debug, Deserialize, Clone)]
pub struct LogApiConfig {
    pub url: Option<String>,
    pub token: Option<String>,
}

// Environment enum for different deployment environments
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Testing,
    Production,
}

// Implement FromStr trait for Environment enum to enable parsing from string
impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testing" | "test" => Ok(Environment::Testing),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!(
                "Invalid environment: {}. Must be one of: development, testing, production",
                s
            )),
        }
    }
}

// Config struct that matches our environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub shortener: ShortenerConfig,
    pub log_api: LogApiConfig,
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> ConfigResult<Self> {
        // Load .env file if it exists
        match dotenv() {
            Ok(_) => debug!(".env file loaded successfully"),
            Err(e) => warn!("Could not load .env file: {}", e),
        }

        // Get version from Cargo.toml or environment
        let version = option_env!("CARGO_PKG_VERSION")
            .unwrap_or("0.1.0")
            .to_string();

        // Create the app config
        let app = AppConfig {
            name: get_env_or_default("APP_NAME", "url-shortener-form")?,
            version: env::var("APP_VERSION").unwrap_or(version),
            environment: get_env_or_default("APP_ENVIRONMENT", "development")?,
            log_level: get_env_or_default("RUST_LOG", "info")?,
        };

        // Shortener config
        let shortener = ShortenerConfig {
            max_batch_rows: get_env_or_default("SHORTENER_MAX_BATCH_ROWS", "5")?,
            code_length: get_env_or_default("SHORTENER_CODE_LENGTH", "6")?,
            default_validity_minutes: get_env_or_default("SHORTENER_DEFAULT_VALIDITY_MINUTES", "30")?,
            base_url: get_env_or_default("SHORTENER_BASE_URL", "http://localhost:3000")?,
        };

        // Remote log endpoint config; unset means the client stays disabled
        let log_api = LogApiConfig {
            url: env::var("LOG_API_URL").ok(),
            token: env::var("LOG_API_TOKEN").ok(),
        };

        let config = Config {
            app,
            shortener,
            log_api,
        };
        info!("Configuration loaded successfully");
        debug!("Loaded config: {:?}", config);

        Ok(config)
    }
}

/// Helper function to get an env variable with a default value
fn get_env_or_default<T: std::str::FromStr>(key: &str, default: &str) -> ConfigResult<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::ParseError(format!("Could not parse {}: {}", key, e))),
        Err(env::VarError::NotPresent) => {
            debug!("{} not set, using default: {}", key, default);
            default.parse::<T>().map_err(|e| {
                ConfigError::ParseError(format!("Could not parse default for {}: {}", key, e))
            })
        }
        Err(e) => Err(ConfigError::EnvVarError(e)),
    }
}
