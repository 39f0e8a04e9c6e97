use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Environment variable holding the Unsplash access key.
pub const ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

#[derive(Debug, Parser)]
#[command(
    name = "photofeed",
    version,
    about = "Loads an Unsplash photo feed through the feed cache",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Unsplash access key.
    #[arg(long, env = ACCESS_KEY_ENV, hide_env_values = true)]
    pub access_key: Option<String>,

    /// Provider REST root.
    #[arg(long, value_name = "URL")]
    pub api_root: Option<String>,

    /// Photos per page.
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Cache directory.
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Number of pages to have in the feed before printing it.
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Image ids to like once the feed is loaded.
    #[arg(long = "like", value_name = "ID")]
    pub likes: Vec<String>,

    /// Drop the cached snapshot before loading.
    #[arg(long)]
    pub refresh: bool,
}
