//! Bootstrap configuration loading
//!
//! Configuration file resolution follows this priority order:
//! 1. Command-line argument (highest priority)
//! 2. `KORTEK_CONFIG` environment variable
//! 3. `<config_dir>/kortek/config.toml`
//! 4. Compiled defaults (fallback)
//!
//! A missing config file is never fatal: a warning is logged and the compiled
//! defaults are used. A config file that exists but cannot be parsed is an error.
//! Selected values can then be overridden through `KORTEK_*` environment variables.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "KORTEK_CONFIG";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Allowed CORS origins (empty = no CORS layer)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Cache TTL tiers
    #[serde(default)]
    pub cache: CacheConfig,

    /// Upstream content source
    #[serde(default)]
    pub source: SourceConfig,

    /// Confidence scoring constants
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Cache time-to-live tiers, in seconds
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Default TTL (lists, home page)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Long TTL (detail documents, schedules)
    #[serde(default = "default_long_ttl_secs")]
    pub long_ttl_secs: u64,
}

/// Upstream content source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Source name, used in logs and health output
    #[serde(default = "default_source_name")]
    pub name: String,

    /// Base URL of the record extraction endpoints
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URL of the search endpoint
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Base URL of the upstream JSON API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Inactive sources are never queried
    #[serde(default = "default_true")]
    pub active: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent upstream
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Confidence scoring constants
///
/// Any accepted response scores at least `floor`; the item-level validity
/// ratio is rescaled into `[floor, floor + span]`.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct ScoringConfig {
    #[serde(default = "default_floor")]
    pub floor: f64,

    #[serde(default = "default_span")]
    pub span: f64,
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_ttl_secs() -> u64 {
    600
}

fn default_long_ttl_secs() -> u64 {
    3600
}

fn default_source_name() -> String {
    "samehadaku".to_string()
}

fn default_base_url() -> String {
    "https://v1.samehadaku.how".to_string()
}

fn default_search_url() -> String {
    "https://samehadaku.now".to_string()
}

fn default_api_url() -> String {
    "https://v1.samehadaku.how/wp-json/custom/v1".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36".to_string()
}

fn default_floor() -> f64 {
    0.8
}

fn default_span() -> f64 {
    0.2
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            logging: LoggingConfig::default(),
            cors_origins: Vec::new(),
            cache: CacheConfig::default(),
            source: SourceConfig::default(),
            scoring: ScoringConfig::default(),
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

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            long_ttl_secs: default_long_ttl_secs(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            name: default_source_name(),
            base_url: default_base_url(),
            search_url: default_search_url(),
            api_url: default_api_url(),
            active: default_true(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            floor: default_floor(),
            span: default_span(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn long_ttl(&self) -> Duration {
        Duration::from_secs(self.long_ttl_secs)
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl TomlConfig {
    /// Apply `KORTEK_*` environment overrides on top of the loaded values
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(port) = env_parse::<u16>("KORTEK_PORT")? {
            self.port = port;
        }
        if let Some(ttl) = env_parse::<u64>("KORTEK_CACHE_TTL")? {
            self.cache.ttl_secs = ttl;
        }
        if let Some(ttl) = env_parse::<u64>("KORTEK_CACHE_LONG_TTL")? {
            self.cache.long_ttl_secs = ttl;
        }
        if let Ok(url) = std::env::var("KORTEK_SOURCE_BASE_URL") {
            self.source.base_url = url;
        }
        if let Ok(url) = std::env::var("KORTEK_SOURCE_API_URL") {
            self.source.api_url = url;
        }
        Ok(())
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(Error::Config("port must be non-zero".to_string()));
        }
        if self.cache.ttl_secs == 0 || self.cache.long_ttl_secs == 0 {
            return Err(Error::Config("cache TTLs must be greater than zero".to_string()));
        }
        let ScoringConfig { floor, span } = self.scoring;
        if !(floor > 0.0 && floor <= 1.0) {
            return Err(Error::Config(format!("scoring.floor must be in (0, 1], got {}", floor)));
        }
        if span < 0.0 || floor + span > 1.0 + f64::EPSILON {
            return Err(Error::Config(format!(
                "scoring.floor + scoring.span must not exceed 1.0 (floor {}, span {})",
                floor, span
            )));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has an invalid value: {:?}", name, raw))),
        Err(_) => Ok(None),
    }
}

/// Parse a TOML document into a config
pub fn parse_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}

/// Load config from an explicit file path
///
/// An unreadable file is an `Io` error, an unparsable one a `Config` error.
pub fn load_from_path(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Default per-user config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("kortek").join("config.toml"))
}

/// Resolves and loads the bootstrap configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Config file candidate by priority, without checking existence
    pub fn config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cli_path {
            return Some(path.clone());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        default_config_path()
    }

    /// Load config: file (if present) → defaults → env overrides → validation
    pub fn load(&self) -> Result<TomlConfig> {
        let mut config = match self.config_path() {
            Some(path) if path.exists() => {
                info!("Loading configuration from {}", path.display());
                load_from_path(&path)?
            }
            Some(path) => {
                warn!(
                    "Config file {} not found, using compiled defaults",
                    path.display()
                );
                TomlConfig::default()
            }
            None => {
                warn!("No config directory available, using compiled defaults");
                TomlConfig::default()
            }
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }
}
