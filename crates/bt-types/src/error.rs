//! Error types for BT Browser.

use std::io;

/// Errors produced by profile storage, navigation, and the command surface.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("account already exists: {0}")]
    AlreadyExists(String),

    #[error("account is protected and cannot be deleted: {0}")]
    ProtectedAccount(String),

    #[error("wrong password for account: {0}")]
    InvalidCredential(String),

    #[error("no such account: {0}")]
    UnknownAccount(String),

    #[error("invalid username: {0:?}")]
    InvalidUsername(String),

    #[error("persistence failure: {0}")]
    Persistence(String),

    #[error("VFS error: {0}")]
    Vfs(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BrowserError>;
