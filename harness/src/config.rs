use std::path::PathBuf;
use std::time::Duration;

use fees_client::DEFAULT_BASE_URL;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Default location of the optional YAML config file.
pub const DEFAULT_CONFIG_FILE: &str = "harness.yaml";

/// Harness configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. harness.yaml file (if exists)
/// 3. Environment variables with FEES_ prefix (always wins)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub checks: ChecksConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the fees API, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout applied by the HTTP client.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pre-issued API key for the `workflow` command.
    /// Set via `FEES_API__KEY`; never written to the report.
    #[serde(default, skip_serializing)]
    pub key: Option<String>,
}

impl ApiConfig {
    /// Build the HTTP client the transport sends through.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(&self.user_agent)
            .build()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Where the JSON report is written; overwritten on every run.
    #[serde(default = "default_report_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Inputs the endpoint checks send.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChecksConfig {
    #[serde(default = "default_search_term")]
    pub search_term: String,

    #[serde(default = "default_category")]
    pub category: String,

    /// Email for the second key-generation variant; `None` skips it.
    #[serde(default = "default_user_email")]
    pub user_email: Option<String>,

    #[serde(default = "default_fee_id")]
    pub fee_id: i64,

    /// An id expected not to exist.
    #[serde(default = "default_missing_fee_id")]
    pub missing_fee_id: i64,

    #[serde(default = "default_invalid_api_key")]
    pub invalid_api_key: String,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("fees-harness/{}", env!("CARGO_PKG_VERSION"))
}

fn default_report_path() -> PathBuf {
    PathBuf::from("test_results.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_search_term() -> String {
    "NIN".to_string()
}

fn default_category() -> String {
    "identity".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_user_email() -> Option<String> {
    Some("test@example.com".to_string())
}

#[allow(clippy::missing_const_for_fn)]
fn default_fee_id() -> i64 {
    1
}

#[allow(clippy::missing_const_for_fn)]
fn default_missing_fee_id() -> i64 {
    99_999
}

fn default_invalid_api_key() -> String {
    "invalid_key_12345".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_page_size() -> u32 {
    5
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            key: None,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: default_report_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            search_term: default_search_term(),
            category: default_category(),
            user_email: default_user_email(),
            fee_id: default_fee_id(),
            missing_fee_id: default_missing_fee_id(),
            invalid_api_key: default_invalid_api_key(),
            page_size: default_page_size(),
        }
    }
}

/// Values from the command line that win over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub report_path: Option<PathBuf>,
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        Self::load_with(yaml_path, &Overrides::default())
    }

    /// Load configuration, apply command-line overrides, then validate.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or the merged
    /// result is invalid.
    pub fn load_with(yaml_path: &str, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("FEES_").split("__"))
            .extract()?;

        if let Some(base_url) = &overrides.base_url {
            config.api.base_url.clone_from(base_url);
        }
        if let Some(path) = &overrides.report_path {
            config.report.path.clone_from(path);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.api.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "api.base_url must start with http:// or https://, got '{base_url}'"
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs cannot be 0".into(),
            ));
        }

        if self.report.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "report.path is required. Set FEES_REPORT__PATH or configure in harness.yaml."
                    .into(),
            ));
        }

        if self.checks.page_size == 0 || self.checks.page_size > 100 {
            return Err(ConfigError::Validation(format!(
                "checks.page_size must be between 1 and 100, got {}",
                self.checks.page_size
            )));
        }

        Ok(())
    }
}
