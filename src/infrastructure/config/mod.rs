//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{ApiConfig, AppConfig, CacheConfig, FeedConfig, LogLevel};
pub use args::{ACCESS_KEY_ENV, CliArgs};
pub use storage::{ConfigError, ConfigOrigin, ConfigStore};
