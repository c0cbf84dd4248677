use std::path::PathBuf;

use crate::game::COLS;

/// Caller contract violations reported by the game engine.
///
/// A full column or a finished game is not an error; those come back as
/// [`DropResult::Rejected`](crate::game::DropResult::Rejected).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid column {column}: expected 0..{max}", max = COLS)]
    InvalidColumn { column: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
