//! Toolbox configuration.
//!
//! Read from `<config dir>/zen-toolbox/config.toml`. Every field has a
//! default, so a missing file (or a partial one) is fine.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::net::proxy::DEFAULT_PROXY_ENDPOINT;

pub const APP_DIR: &str = "zen-toolbox";
pub const CONFIG_FILE: &str = "config.toml";

/// Set to `1` to force the public-proxy path.
pub const PROXY_ONLY_ENV: &str = "ZEN_TOOLBOX_PROXY_ONLY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolboxConfig {
    /// Fetch through the desktop bridge instead of the public proxy.
    pub use_bridge: bool,
    pub fetch_timeout_secs: u64,
    pub max_redirects: usize,
    pub proxy_endpoint: String,
    /// Maximum line width for the HTML formatter.
    pub print_width: usize,
    pub user_agent: String,
    /// Overrides the key-value store location.
    pub storage_path: Option<PathBuf>,
}

impl Default for ToolboxConfig {
    fn default() -> Self {
        Self {
            use_bridge: true,
            fetch_timeout_secs: 10,
            max_redirects: 10,
            proxy_endpoint: DEFAULT_PROXY_ENDPOINT.to_string(),
            print_width: crate::format::DEFAULT_PRINT_WIDTH,
            user_agent: concat!("Mozilla/5.0 (compatible; ZenToolbox/", env!("CARGO_PKG_VERSION"), ")")
                .to_string(),
            storage_path: None,
        }
    }
}

impl ToolboxConfig {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Parse a config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load from the default location, falling back to defaults on any
    /// error, then apply environment overrides.
    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) => Self::from_file(&path).unwrap_or_else(|e| {
                log::warn!("{}; using default configuration", e);
                Self::default()
            }),
            None => Self::default(),
        };

        if std::env::var(PROXY_ONLY_ENV).is_ok_and(|v| v == "1") {
            config.use_bridge = false;
        }
        config
    }

    /// Where the key-value store lives.
    pub fn store_path(&self) -> Option<PathBuf> {
        self.storage_path
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR).join("storage.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ToolboxConfig::default();
        assert!(config.use_bridge);
        assert_eq!(config.fetch_timeout_secs, 10);
        assert_eq!(config.print_width, 100);
        assert_eq!(config.proxy_endpoint, "https://api.allorigins.win/get");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = ToolboxConfig::from_toml("use_bridge = false\nprint_width = 80\n").unwrap();
        assert!(!config.use_bridge);
        assert_eq!(config.print_width, 80);
        assert_eq!(config.max_redirects, 10);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToolboxConfig::from_file(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, ToolboxConfig::default());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "print_width = \"wide\"").unwrap();
        assert!(matches!(
            ToolboxConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn storage_override() {
        let config = ToolboxConfig {
            storage_path: Some(PathBuf::from("/tmp/kv.json")),
            ..ToolboxConfig::default()
        };
        assert_eq!(config.store_path(), Some(PathBuf::from("/tmp/kv.json")));
    }
}
