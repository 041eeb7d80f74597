//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `giveaway-config.yaml`. Every
//! field has a default, so an empty file (or no file at all) gives a
//! working local setup: `giveaway.db` next to `img/`, `hidden_img/` and
//! `collages/`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use giveaway_db::SqliteConfig;
use giveaway_images::ImageDirs;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GiveawayConfig {
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Image namespace directories.
    #[serde(default)]
    pub images: ImagesConfig,

    /// Claim protocol settings.
    #[serde(default)]
    pub claim: ClaimConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GiveawayConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `DATABASE_URL` overrides `database.url`
    /// - `GIVEAWAY_IMAGE_DIR` overrides `images.source_dir`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override values from an environment lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = lookup("GIVEAWAY_IMAGE_DIR") {
            self.images.source_dir = PathBuf::from(val);
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL.
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Milliseconds to wait for a pooled connection.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Milliseconds a writer waits on a locked database.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl DatabaseConfig {
    /// Pool configuration for [`giveaway_db::Database::connect`].
    pub fn sqlite(&self) -> SqliteConfig {
        SqliteConfig::new(&self.url)
            .with_max_connections(self.max_connections)
            .with_connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .with_busy_timeout(Duration::from_millis(self.busy_timeout_ms))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connect_timeout_ms: default_connect_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

/// Image namespace directories.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImagesConfig {
    /// Revealed prize images; also the catalog seed source.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Obscured placeholders.
    #[serde(default = "default_obscured_dir")]
    pub obscured_dir: PathBuf,

    /// Generated collages.
    #[serde(default = "default_collage_dir")]
    pub collage_dir: PathBuf,

    /// Collage file extension, which selects the output format.
    #[serde(default = "default_collage_extension")]
    pub collage_extension: String,
}

impl ImagesConfig {
    /// Directory layout for [`giveaway_images::ImageStore::new`].
    pub fn dirs(&self) -> ImageDirs {
        ImageDirs {
            source: self.source_dir.clone(),
            obscured: self.obscured_dir.clone(),
            collages: self.collage_dir.clone(),
            collage_extension: self.collage_extension.clone(),
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            obscured_dir: default_obscured_dir(),
            collage_dir: default_collage_dir(),
            collage_extension: default_collage_extension(),
        }
    }
}

/// Claim protocol settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClaimConfig {
    /// How many prizes to try before giving up on a contended claim.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://giveaway.db".to_owned()
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

const fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("img")
}

fn default_obscured_dir() -> PathBuf {
    PathBuf::from("hidden_img")
}

fn default_collage_dir() -> PathBuf {
    PathBuf::from("collages")
}

fn default_collage_extension() -> String {
    "jpg".to_owned()
}

const fn default_max_attempts() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GiveawayConfig::default();
        assert_eq!(config.database.url, "sqlite://giveaway.db");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.images.source_dir, PathBuf::from("img"));
        assert_eq!(config.images.obscured_dir, PathBuf::from("hidden_img"));
        assert_eq!(config.images.collage_extension, "jpg");
        assert_eq!(config.claim.max_attempts, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        assert_eq!(GiveawayConfig::parse("").unwrap(), GiveawayConfig::default());
        assert_eq!(GiveawayConfig::parse("{}").unwrap(), GiveawayConfig::default());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
database:
  url: "sqlite:///var/lib/giveaway/prizes.db"
  max_connections: 4
  connect_timeout_ms: 1000
  busy_timeout_ms: 2500

images:
  source_dir: /srv/prizes/img
  obscured_dir: /srv/prizes/hidden
  collage_dir: /srv/prizes/collages
  collage_extension: png

claim:
  max_attempts: 3

logging:
  level: debug
"#;
        let config = GiveawayConfig::parse(yaml).unwrap();
        assert_eq!(config.database.url, "sqlite:///var/lib/giveaway/prizes.db");

        let sqlite = config.database.sqlite();
        assert_eq!(sqlite.max_connections, 4);
        assert_eq!(sqlite.connect_timeout, Duration::from_secs(1));
        assert_eq!(sqlite.busy_timeout, Duration::from_millis(2500));

        let dirs = config.images.dirs();
        assert_eq!(dirs.source, PathBuf::from("/srv/prizes/img"));
        assert_eq!(dirs.obscured, PathBuf::from("/srv/prizes/hidden"));
        assert_eq!(dirs.collages, PathBuf::from("/srv/prizes/collages"));
        assert_eq!(dirs.collage_extension, "png");

        assert_eq!(config.claim.max_attempts, 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config = GiveawayConfig::parse("claim:\n  max_attempts: 9\n").unwrap();
        assert_eq!(config.claim.max_attempts, 9);
        assert_eq!(config.database, DatabaseConfig::default());
        assert_eq!(config.images, ImagesConfig::default());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = GiveawayConfig::parse("claim: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn env_overrides_replace_yaml_values() {
        let mut config = GiveawayConfig::default();
        config.apply_env_overrides(|key| match key {
            "DATABASE_URL" => Some("sqlite://override.db".to_owned()),
            "GIVEAWAY_IMAGE_DIR" => Some("/tmp/prizes".to_owned()),
            _ => None,
        });
        assert_eq!(config.database.url, "sqlite://override.db");
        assert_eq!(config.images.source_dir, PathBuf::from("/tmp/prizes"));
        assert_eq!(config.images.obscured_dir, PathBuf::from("hidden_img"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GiveawayConfig::from_file(Path::new("/nonexistent/giveaway-config.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
