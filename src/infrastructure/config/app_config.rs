//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::use_cases::{DEFAULT_CACHE_KEY, DEFAULT_PAGE_SIZE, FeedSessionConfig};
use crate::application::services::DEFAULT_SCROLL_THRESHOLD;
use crate::infrastructure::unsplash::UNSPLASH_API_BASE;

const APP_NAME: &str = "photofeed";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI
/// arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Photo provider settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Feed paging settings.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Snapshot cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Photo provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// REST root of the provider.
    #[serde(default = "default_api_root")]
    pub root: String,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            root: default_api_root(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Feed paging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Photos per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Quiet period after each page request, in milliseconds.
    #[serde(default)]
    pub cooldown_ms: u64,

    /// Fraction of the feed height that triggers the next page.
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            cooldown_ms: 0,
            scroll_threshold: default_scroll_threshold(),
        }
    }
}

/// Snapshot cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Key the feed snapshot is stored under.
    #[serde(default = "default_cache_key")]
    pub key: String,

    /// Snapshot lifetime in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,

    /// Cache directory; platform cache dir when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key: default_cache_key(),
            ttl_secs: default_cache_ttl(),
            dir: None,
        }
    }
}

fn default_api_root() -> String {
    UNSPLASH_API_BASE.to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

const fn default_scroll_threshold() -> f64 {
    DEFAULT_SCROLL_THRESHOLD
}

fn default_cache_key() -> String {
    DEFAULT_CACHE_KEY.to_string()
}

const fn default_cache_ttl() -> u64 {
    2400
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_root) = &args.api_root {
            self.api.root.clone_from(api_root);
        }
        if let Some(page_size) = args.page_size {
            self.feed.page_size = page_size;
        }
        if let Some(cache_dir) = &args.cache_dir {
            self.cache.dir = Some(cache_dir.clone());
        }
    }

    /// Session settings derived from this configuration.
    #[must_use]
    pub fn session_config(&self) -> FeedSessionConfig {
        FeedSessionConfig {
            cache_key: self.cache.key.clone(),
            page_size: self.feed.page_size,
            cooldown: Duration::from_millis(self.feed.cooldown_ms),
            scroll_threshold: self.feed.scroll_threshold,
        }
    }

    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("photofeed.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            api: ApiConfig::default(),
            feed: FeedConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}
