//! Layered server configuration: defaults, then an optional TOML file, then
//! `BLOTTER_*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  /// SQLite database file, opened read-write at startup.
  pub database_path:     PathBuf,
  /// Create the file and apply the schema when it does not exist yet.
  pub create_if_missing: bool,
}

impl ServerConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8000)?
      .set_default("database_path", "./db/stpaul_crime.sqlite3")?
      .set_default("create_if_missing", false)?
      .add_source(File::from(path).required(false))
      .add_source(Environment::with_prefix("BLOTTER"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
