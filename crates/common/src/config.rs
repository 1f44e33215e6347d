//! Configuration management for CiteNetX
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default, config/{env}, config/local)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Scopus source configuration
    pub scopus: ScopusConfig,

    /// Checkpoint persistence configuration
    pub checkpoint: CheckpointConfig,

    /// Crawl/session configuration
    pub crawl: CrawlConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScopusConfig {
    /// API key sent as X-ELS-APIKey
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,

    /// Page size for author publication searches
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckpointConfig {
    /// Directory checkpoints are written to
    #[serde(default = "default_checkpoint_dir")]
    pub dir: String,

    /// Filename base; the checkpoint key is appended to it
    #[serde(default = "default_checkpoint_base")]
    pub base_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrawlConfig {
    /// Newline-delimited seed EID file
    pub seed_file: Option<String>,

    /// Reference-expansion depth for the seed batch
    #[serde(default)]
    pub target_depth: u32,

    /// Checkpoint key to restore before crawling
    pub resume_from: Option<String>,

    /// Checkpoint key to save under (timestamp-derived when absent)
    pub save_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logging: bool,
}

// Default value functions
fn default_base_url() -> String { "https://api.elsevier.com".to_string() }
fn default_request_timeout() -> u64 { 30 }
fn default_page_size() -> usize { 25 }
fn default_checkpoint_dir() -> String { "./CiteNetXCheckpoints".to_string() }
fn default_checkpoint_base() -> String { "CiteNetXCheckpoints".to_string() }
fn default_log_level() -> String { "info".to_string() }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables with APP__ prefix
            // e.g., APP__SCOPUS__API_KEY=...
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.scopus.timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scopus: ScopusConfig {
                api_key: None,
                base_url: default_base_url(),
                timeout_secs: default_request_timeout(),
                page_size: default_page_size(),
            },
            checkpoint: CheckpointConfig {
                dir: default_checkpoint_dir(),
                base_name: default_checkpoint_base(),
            },
            crawl: CrawlConfig {
                seed_file: None,
                target_depth: 0,
                resume_from: None,
                save_key: None,
            },
            observability: ObservabilityConfig {
                log_level: default_log_level(),
                json_logging: false,
            },
        }
    }
}
