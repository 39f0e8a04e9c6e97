//! Infrastructure layer with external service adapters.

/// Disk-backed feed snapshot cache.
pub mod cache;
/// Application configuration.
pub mod config;
/// Unsplash API client.
pub mod unsplash;

pub use cache::FileFeedCache;
pub use config::{AppConfig, CliArgs, ConfigOrigin, ConfigStore, LogLevel};
pub use unsplash::UnsplashClient;
