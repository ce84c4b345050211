//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::params::{DEFAULT_MAX_TIME_DIFF_MINUTES, TIME_DIFF_CEILING_MINUTES};
use crate::query::DataKind;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_MAX_TIME_DIFF_MINUTES: &str = "MAX_TIME_DIFF_IN_MINUTES";
pub const ENV_POLL_INTERVAL_MS: &str = "PRINTER_TIMELINE_POLL_INTERVAL_MS";
pub const ENV_HOST: &str = "PRINTER_TIMELINE_HOST";
pub const ENV_PORT: &str = "PRINTER_TIMELINE_PORT";
pub const ENV_AWS_REGION: &str = "MAIN_AWS_REGION";
pub const ENV_WEST_BUCKET_REGION: &str = "AWS_BLACKSEA_BUCKET_REGION";
pub const ENV_SUBSCRIPTION_TABLE: &str = "TABLE_CC_PRINTER_SUBSCRIPTION";
pub const ENV_LOG_LEVEL: &str = "PRINTER_TIMELINE_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "PRINTER_TIMELINE_LOG_FORMAT";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Query validation and execution configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Widest window a request may ask for
    #[serde(default = "default_max_time_diff")]
    pub max_time_diff_minutes: u32,

    /// Delay between result polls (0 = poll again as soon as the backend answers)
    #[serde(default)]
    pub poll_interval_ms: u64,

    /// Log group overrides keyed by data kind slug
    #[serde(default)]
    pub log_groups: HashMap<String, String>,
}

fn default_max_time_diff() -> u32 {
    DEFAULT_MAX_TIME_DIFF_MINUTES
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_time_diff_minutes: default_max_time_diff(),
            poll_interval_ms: 0,
            log_groups: HashMap::new(),
        }
    }
}

impl QueryConfig {
    /// Configured window width, clamped to the two-week ceiling.
    ///
    /// Zero falls back to the default.
    pub fn effective_max_time_diff(&self) -> u32 {
        match self.max_time_diff_minutes {
            0 => DEFAULT_MAX_TIME_DIFF_MINUTES,
            m => m.min(TIME_DIFF_CEILING_MINUTES),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Log group overrides whose key names a known data kind
    pub fn log_group_overrides(&self) -> Result<Vec<(DataKind, String)>, ConfigError> {
        self.log_groups
            .iter()
            .map(|(slug, group)| {
                DataKind::from_slug(slug)
                    .map(|kind| (kind, group.clone()))
                    .ok_or_else(|| ConfigError::UnknownDataKind(slug.clone()))
            })
            .collect()
    }
}

/// AWS backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Region of the log groups, the `US_EAST_1` buckets and the subscription table.
    /// The default provider chain decides when unset.
    pub region: Option<String>,

    /// AWS region serving `US_WEST_1` buckets
    #[serde(default = "default_west_bucket_region")]
    pub us_west_1_bucket_region: String,

    /// DynamoDB table holding printer subscriptions
    #[serde(default = "default_subscription_table")]
    pub subscription_table: String,
}

fn default_west_bucket_region() -> String {
    "us-west-1".to_string()
}

fn default_subscription_table() -> String {
    "CCPrinterSubscription".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            region: None,
            us_west_1_bucket_region: default_west_bucket_region(),
            subscription_table: default_subscription_table(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;

        config.query.log_group_overrides()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("printer-timeline").join("config.toml")),
            Some(PathBuf::from("/etc/printer-timeline/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Query overrides
        if let Some(diff) = lookup(ENV_MAX_TIME_DIFF_MINUTES) {
            self.query.max_time_diff_minutes = parse_max_time_diff(&diff);
        }
        if let Some(interval) = lookup(ENV_POLL_INTERVAL_MS) {
            if let Ok(ms) = interval.parse() {
                self.query.poll_interval_ms = ms;
            }
        }

        // Backend overrides
        if let Some(region) = lookup(ENV_AWS_REGION) {
            self.backend.region = Some(region);
        }
        if let Some(region) = lookup(ENV_WEST_BUCKET_REGION) {
            self.backend.us_west_1_bucket_region = region;
        }
        if let Some(table) = lookup(ENV_SUBSCRIPTION_TABLE) {
            self.backend.subscription_table = table;
        }

        // Logging overrides
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = format;
        }
    }
}

/// Unparseable or non-positive values fall back to the default; large ones are clamped
fn parse_max_time_diff(s: &str) -> u32 {
    match s.trim().parse::<i64>() {
        Ok(m) if m >= 1 => m.min(i64::from(TIME_DIFF_CEILING_MINUTES)) as u32,
        _ => DEFAULT_MAX_TIME_DIFF_MINUTES,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Unknown data kind in [query.log_groups]: {0}")]
    UnknownDataKind(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Printer Timeline Configuration
#
# Environment variables override these settings:
# - PRINTER_TIMELINE_HOST
# - PRINTER_TIMELINE_PORT
# - MAX_TIME_DIFF_IN_MINUTES
# - PRINTER_TIMELINE_POLL_INTERVAL_MS
# - MAIN_AWS_REGION
# - AWS_BLACKSEA_BUCKET_REGION
# - TABLE_CC_PRINTER_SUBSCRIPTION
# - PRINTER_TIMELINE_LOG_LEVEL
# - PRINTER_TIMELINE_LOG_FORMAT

[server]
# HTTP server host
host = "0.0.0.0"

# HTTP server port
port = 8080

[query]
# Widest time window a request may ask for, in minutes (max 20160 = two weeks)
max_time_diff_minutes = 60

# Delay between result polls in milliseconds (0 = poll again immediately)
poll_interval_ms = 0

# Log group per data kind (defaults shown)
[query.log_groups]
# open-xml = "/aws/lambda/AWSUpload"
# cloud-json = "/aws/lambda/AWSParser"
# heartbeat = "/aws/lambda/AWSUpload"
# rta = "/aws/lambda/AWSUploadRTA"

[backend]
# AWS region of the log groups, US_EAST_1 buckets and subscription table
# (default: AWS provider chain)
# region = "us-east-1"

# AWS region serving US_WEST_1 buckets
us_west_1_bucket_region = "us-west-1"

# DynamoDB table of printer subscriptions
subscription_table = "CCPrinterSubscription"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert_eq!(config.query.max_time_diff_minutes, 60);
        assert_eq!(config.query.poll_interval(), Duration::ZERO);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.backend.region.is_none());
        assert_eq!(config.backend.us_west_1_bucket_region, "us-west-1");
        assert_eq!(config.backend.subscription_table, "CCPrinterSubscription");
    }

    #[test]
    fn test_max_time_diff_from_env() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[(ENV_MAX_TIME_DIFF_MINUTES, "120")]));
        assert_eq!(config.query.max_time_diff_minutes, 120);

        config.apply_overrides(lookup_from(&[(ENV_MAX_TIME_DIFF_MINUTES, "999999")]));
        assert_eq!(config.query.max_time_diff_minutes, TIME_DIFF_CEILING_MINUTES);

        config.apply_overrides(lookup_from(&[(ENV_MAX_TIME_DIFF_MINUTES, "two hours")]));
        assert_eq!(config.query.max_time_diff_minutes, DEFAULT_MAX_TIME_DIFF_MINUTES);

        config.apply_overrides(lookup_from(&[(ENV_MAX_TIME_DIFF_MINUTES, "-5")]));
        assert_eq!(config.query.max_time_diff_minutes, DEFAULT_MAX_TIME_DIFF_MINUTES);
    }

    #[test]
    fn test_other_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[
            (ENV_PORT, "9000"),
            (ENV_AWS_REGION, "us-west-1"),
            (ENV_LOG_FORMAT, "json"),
            (ENV_POLL_INTERVAL_MS, "250"),
        ]));

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.backend.region.as_deref(), Some("us-west-1"));
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.query.poll_interval(), Duration::from_millis(250));

        config.apply_overrides(lookup_from(&[
            (ENV_WEST_BUCKET_REGION, "us-west-2"),
            (ENV_SUBSCRIPTION_TABLE, "CCPrinterSubscription-dev"),
        ]));
        assert_eq!(config.backend.us_west_1_bucket_region, "us-west-2");
        assert_eq!(config.backend.subscription_table, "CCPrinterSubscription-dev");

        // Bad port is ignored
        config.apply_overrides(lookup_from(&[(ENV_PORT, "http")]));
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_effective_max_clamps_file_values() {
        let mut query = QueryConfig::default();
        query.max_time_diff_minutes = 50_000;
        assert_eq!(query.effective_max_time_diff(), TIME_DIFF_CEILING_MINUTES);

        query.max_time_diff_minutes = 0;
        assert_eq!(query.effective_max_time_diff(), DEFAULT_MAX_TIME_DIFF_MINUTES);

        query.max_time_diff_minutes = 240;
        assert_eq!(query.effective_max_time_diff(), 240);
    }

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.query.max_time_diff_minutes, 60);
        assert!(config.query.log_groups.is_empty());
        assert_eq!(config.backend.subscription_table, "CCPrinterSubscription");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[query]
max_time_diff_minutes = 1440

[query.log_groups]
cloud-json = "/aws/lambda/AWSParser-eu"

[backend]
region = "eu-west-1"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.query.max_time_diff_minutes, 1440);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.backend.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.backend.us_west_1_bucket_region, "us-west-1");

        let overrides = config.query.log_group_overrides().unwrap();
        assert_eq!(
            overrides,
            vec![(DataKind::CloudJson, "/aws/lambda/AWSParser-eu".to_string())]
        );
    }

    #[test]
    fn test_unknown_log_group_kind_rejected() {
        let err = Config::parse("[query.log_groups]\nsubscriptions = \"/aws/x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDataKind(ref s) if s == "subscriptions"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/printer-timeline.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
