//! `config.toml` location and loading.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::app_config::AppConfig;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while reading or creating the configuration file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("no platform configuration directory")]
    NoConfigDir,
    #[error("config file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode default config: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// How a configuration was obtained.
///
/// Loading runs before the log subscriber exists, so the caller reports
/// this once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Parsed from an existing file.
    File(PathBuf),
    /// No file existed; defaults were written to this path.
    Created(PathBuf),
    /// The file did not parse; defaults are in use and the file is untouched.
    Fallback {
        /// Offending file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
    /// No config location is available; built-in defaults are in use.
    Builtin,
}

/// A `config.toml` on disk.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Uses the file at `path`.
    #[must_use]
    pub const fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Uses `config.toml` in the platform config directory.
    ///
    /// # Errors
    /// Returns `ConfigError::NoConfigDir` if the platform has no config
    /// directory for the current user.
    pub fn at_default_location() -> Result<Self, ConfigError> {
        AppConfig::default_config_dir()
            .map(|dir| Self::at(dir.join(CONFIG_FILE_NAME)))
            .ok_or(ConfigError::NoConfigDir)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration, writing the defaults on first run.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read, or the default file
    /// cannot be written.
    pub fn load(&self) -> Result<(AppConfig, ConfigOrigin), ConfigError> {
        if !self.path.exists() {
            let config = AppConfig::default();
            self.save(&config)?;
            return Ok((config, ConfigOrigin::Created(self.path.clone())));
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(match toml::from_str::<AppConfig>(&content) {
            Ok(config) => (config, ConfigOrigin::File(self.path.clone())),
            Err(e) => (
                AppConfig::default(),
                ConfigOrigin::Fallback {
                    path: self.path.clone(),
                    reason: e.to_string(),
                },
            ),
        })
    }

    /// Replaces the file with `config`.
    ///
    /// # Errors
    /// Returns `ConfigError` if encoding or the atomic replace fails.
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config)?;
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut staged = tempfile::NamedTempFile::new_in(&dir)?;
        staged.write_all(content.as_bytes())?;
        staged.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_first_load_creates_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photofeed").join(CONFIG_FILE_NAME);
        let store = ConfigStore::at(path.clone());

        let (config, origin) = store.load().unwrap();

        assert_eq!(origin, ConfigOrigin::Created(path.clone()));
        assert_eq!(config.feed.page_size, 10);
        assert!(path.exists());

        let (reloaded, origin) = store.load().unwrap();
        assert_eq!(origin, ConfigOrigin::File(path));
        assert_eq!(reloaded.cache.key, "unsplashImages");
        assert_eq!(reloaded.cache.ttl_secs, 2400);
    }

    #[test]
    fn test_malformed_file_reports_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[feed\npage_size = 3").unwrap();

        let (config, origin) = ConfigStore::at(path.clone()).load().unwrap();

        assert_eq!(config.feed.page_size, 10);
        match origin {
            ConfigOrigin::Fallback { path: reported, reason } => {
                assert_eq!(reported, path);
                assert!(!reason.is_empty());
            }
            other => panic!("expected fallback, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "[feed\npage_size = 3");
    }

    #[test]
    fn test_reads_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[feed]\npage_size = 3\n").unwrap();

        let (config, origin) = ConfigStore::at(path.clone()).load().unwrap();

        assert_eq!(config.feed.page_size, 3);
        assert_eq!(origin, ConfigOrigin::File(path));
    }

    #[test]
    fn test_save_overwrites_file() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join(CONFIG_FILE_NAME));
        let mut config = AppConfig::default();
        config.feed.cooldown_ms = 750;

        store.save(&config).unwrap();
        let (loaded, _) = store.load().unwrap();

        assert_eq!(loaded.feed.cooldown_ms, 750);
    }
}
