//! Startup configuration read from `btbrowser.toml`.

use std::path::{Path, PathBuf};

use bt_types::error::{BrowserError, Result};
use serde::Deserialize;

/// Default config file, relative to the working directory.
pub const CONFIG_FILE: &str = "btbrowser.toml";

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "BT_BROWSER_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Root of the on-disk filesystem the app may touch.
    pub data_dir: PathBuf,
    /// Accounts directory, relative to `data_dir`.
    pub accounts_dir: String,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub window_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            accounts_dir: "accounts".to_string(),
            log_filter: "info".to_string(),
            window_title: "BT Browser".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| BrowserError::Config(format!("{CONFIG_FILE}: {e}")))
    }

    /// Read `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(BrowserError::Config(format!("{}: {e}", path.display()))),
        }
    }

    /// Resolve the config file from `BT_BROWSER_CONFIG`, falling back to
    /// `btbrowser.toml`, and load it.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        Self::load_from(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let cfg = AppConfig::from_toml("accounts_dir = \"profiles\"\nlog_filter = \"debug\"\n")
            .unwrap();
        assert_eq!(cfg.accounts_dir, "profiles");
        assert_eq!(cfg.log_filter, "debug");
        assert_eq!(cfg.data_dir, PathBuf::from("."));
        assert_eq!(cfg.window_title, "BT Browser");
    }

    #[test]
    fn malformed_document_is_config_error() {
        for bad in ["accounts_dir = ", "accounts_dir = 3", "colour = \"red\""] {
            assert!(
                matches!(AppConfig::from_toml(bad), Err(BrowserError::Config(_))),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "window_title = \"Kiosk\"\n").unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap().window_title, "Kiosk");
    }
}
