//! Site configuration loader for the values the `asset_path` tag depends on.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// File name searched for when discovering the site configuration.
pub const DEFAULT_CONFIG_FILE: &str = "_config.yml";

/// Errors that can occur while loading the site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// Failed to read the configuration file from disk.
  #[error("failed to read site config {}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// Failed to parse the YAML configuration.
  #[error("failed to parse site config {}", path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_yaml::Error,
  },
}

/// Site settings read from `_config.yml`. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
  /// Prefix prepended to every generated URL, e.g. `/blog`.
  pub baseurl: String,
  /// Site source directory, relative to the configuration file.
  pub source: PathBuf,
  /// Directory holding dated post sources, relative to `source`.
  pub posts_dir: PathBuf,
  /// Optional JSON export of the content index, used instead of scanning posts.
  pub index_file: Option<PathBuf>,
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      baseurl: String::new(),
      source: PathBuf::from("."),
      posts_dir: PathBuf::from("_posts"),
      index_file: None,
    }
  }
}

impl SiteConfig {
  /// Load `_config.yml` from `site_dir`, falling back to defaults.
  ///
  /// A missing file silently yields the defaults. An unreadable or malformed one is logged
  /// and also yields the defaults, so rendering can continue.
  pub fn discover(site_dir: &Path) -> Self {
    let candidate = site_dir.join(DEFAULT_CONFIG_FILE);
    match Self::from_path(&candidate) {
      Ok(config) => config,
      Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
        Self::default()
      }
      Err(err) => {
        warn!(error = %err, "using default site config");
        Self::default()
      }
    }
  }

  /// Read configuration from a specific YAML file.
  pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    if content.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Directory holding post sources for a site rooted at `site_dir`.
  pub fn posts_path(&self, site_dir: &Path) -> PathBuf {
    site_dir.join(&self.source).join(&self.posts_dir)
  }

  /// Content index export for a site rooted at `site_dir`, if one is configured.
  pub fn index_path(&self, site_dir: &Path) -> Option<PathBuf> {
    self
      .index_file
      .as_ref()
      .map(|file| site_dir.join(&self.source).join(file))
  }
}
