use std::path::Path;

use log::warn;

use crate::ai::{SearchConfig, MAX_SEARCH_DEPTH};
use crate::error::ConfigError;
use crate::game::{Board, Player, DEFAULT_COLUMNS, DEFAULT_ROWS};

/// Largest board, in cells, that validation accepts.
pub const MAX_BOARD_CELLS: usize = 1024;

/// Board shape and turn order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    /// Let the AI make the first move.
    pub ai_first: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            ai_first: false,
        }
    }
}

impl GameConfig {
    pub fn new_board(&self) -> Board {
        Board::new(self.rows, self.columns)
    }

    pub fn first_player(&self) -> Player {
        if self.ai_first {
            Player::Ai
        } else {
            Player::Human
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub search: SearchConfig,
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
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.rows == 0 {
            return Err(ConfigError::Validation("game.rows must be >= 1".into()));
        }
        if self.game.columns == 0 {
            return Err(ConfigError::Validation("game.columns must be >= 1".into()));
        }
        match self.game.rows.checked_mul(self.game.columns) {
            Some(cells) if cells <= MAX_BOARD_CELLS => {}
            _ => {
                return Err(ConfigError::Validation(format!(
                    "game.rows * game.columns must be <= {}",
                    MAX_BOARD_CELLS
                )))
            }
        }
        if !self.search.time_budget_secs.is_finite() || self.search.time_budget_secs < 0.0 {
            return Err(ConfigError::Validation(
                "search.time_budget_secs must be a finite number >= 0".into(),
            ));
        }
        if self.search.max_depth == 0 || self.search.max_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "search.max_depth must be in [1, {}]",
                MAX_SEARCH_DEPTH
            )));
        }
        if self.search.max_nodes == Some(0) {
            return Err(ConfigError::Validation(
                "search.max_nodes must be >= 1 when set".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
