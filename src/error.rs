//! Error types.
//!
//! Only [`InitError`] is fatal. [`AssetError`] is always recovered by falling
//! back to a flat shape or silence, and [`ConfigError`] by keeping defaults.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset '{}' not found", path.display())]
    Missing { path: PathBuf },
    #[error("failed to load asset '{}': {reason}", path.display())]
    Load { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file '{}': {reason}", path.display())]
    Read { path: PathBuf, reason: String },
    #[error("failed to save config file '{}': {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum InitError {
    #[error("could not create the game window: {0}")]
    Window(String),
}
