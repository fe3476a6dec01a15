use std::path::PathBuf;

/// Errors that can occur while choosing a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal moves on the board")]
    NoLegalMoves,

    #[error("node budget of {limit} exhausted at depth {depth}")]
    NodeBudgetExhausted { limit: u64, depth: u32 },
}

impl SearchError {
    /// Errors after which the deepening loop keeps its last completed result.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SearchError::NodeBudgetExhausted { .. })
    }
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
