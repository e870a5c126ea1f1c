use chess960_core::ChessError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelfPlayError {
    #[error(transparent)]
    Chess(#[from] ChessError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Record error at line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for self-play operations
pub type Result<T> = std::result::Result<T, SelfPlayError>;
