//! TOML configuration parsing.
//!
//! ```toml
//! [db]
//! backend = "sqlite"          # or "memory"
//! path = "./data/notes.sqlite"
//!
//! [server]
//! bind = "127.0.0.1:8000"
//!
//! [client]
//! base_url = "http://localhost:8000"
//! ```
//!
//! `NOTES_DB_PATH`, `NOTES_BIND` and `NOTES_URL` override the file values.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Sqlite,
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./data/notes.sqlite")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Config {
    /// Defaults for every section, used when no config file exists.
    pub fn minimal() -> Self {
        Self {
            db: DbConfig::default(),
            server: ServerConfig::default(),
            client: ClientConfig::default(),
        }
    }

    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var("NOTES_DB_PATH") {
            self.db.path = PathBuf::from(path);
        }
        if let Ok(bind) = std::env::var("NOTES_BIND") {
            self.server.bind = bind;
        }
        if let Ok(url) = std::env::var("NOTES_URL") {
            self.client.base_url = url;
        }
    }

    fn validate(&self) -> Result<()> {
        let bind = &self.server.bind;
        bind.parse::<SocketAddr>()
            .with_context(|| format!("server.bind is not a socket address: '{}'", bind))?;

        let url = &self.client.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("client.base_url must start with http:// or https://, got '{}'", url);
        }

        if self.db.backend == Backend::Sqlite && self.db.path.as_os_str().is_empty() {
            bail!("db.path must not be empty when backend is 'sqlite'");
        }

        Ok(())
    }
}

/// Parses a config from TOML text, applying env overrides and validation.
pub fn parse_config(content: &str) -> Result<Config> {
    let mut config: Config =
        toml::from_str(content).with_context(|| "Failed to parse config file")?;
    config.apply_env();
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

/// Loads `path` if it exists, otherwise falls back to [`Config::minimal`].
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        let mut config = Config::minimal();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = toml::from_str::<Config>("").unwrap();
        assert_eq!(config.db.backend, Backend::Sqlite);
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.client.base_url, "http://localhost:8000");
    }

    #[test]
    fn memory_backend_parses() {
        let config = toml::from_str::<Config>("[db]\nbackend = \"memory\"\n").unwrap();
        assert_eq!(config.db.backend, Backend::Memory);
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(toml::from_str::<Config>("[db]\nbackend = \"mongo\"\n").is_err());
    }

    #[test]
    fn rejects_bad_bind() {
        let mut config = Config::minimal();
        config.server.bind = "localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_base_url() {
        let mut config = Config::minimal();
        config.client.base_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.toml");
        std::fs::write(&path, "[server]\nbind = \"0.0.0.0:9000\"\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9000");
    }
}
