use std::path::Path;

use crate::error::ConfigError;
use crate::game::{Cell, Player};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub replay: ReplayConfig,
    pub log: LogConfig,
}

/// Symbols used when printing a board as text.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub empty: char,
    pub red: char,
    pub yellow: char,
    /// Print column indices under the grid
    pub column_numbers: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            empty: '.',
            red: Player::Red.symbol(),
            yellow: Player::Yellow.symbol(),
            column_numbers: true,
        }
    }
}

impl DisplayConfig {
    pub fn glyph(&self, cell: Cell) -> char {
        match cell {
            Cell::Empty => self.empty,
            Cell::Owner(Player::Red) => self.red,
            Cell::Owner(Player::Yellow) => self.yellow,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Stop replaying at the first rejected drop instead of skipping it
    pub halt_on_rejection: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let symbols = [
            ("display.empty", self.display.empty),
            ("display.red", self.display.red),
            ("display.yellow", self.display.yellow),
        ];
        for (name, symbol) in symbols {
            if symbol.is_whitespace() {
                return Err(ConfigError::Validation(format!(
                    "{name} must not be whitespace"
                )));
            }
        }
        if self.display.empty == self.display.red
            || self.display.empty == self.display.yellow
            || self.display.red == self.display.yellow
        {
            return Err(ConfigError::Validation(
                "display symbols must be distinct".into(),
            ));
        }

        if self.log.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "log.filter must not be empty".into(),
            ));
        }
        if let Err(e) = tracing_subscriber::EnvFilter::try_new(&self.log.filter) {
            return Err(ConfigError::Validation(format!(
                "log.filter is not a valid filter: {e}"
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
