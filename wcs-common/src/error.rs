//! Common error types for the wine cheat sheet

use thiserror::Error;

/// Common result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Terminal failure of the one-shot catalog load
///
/// Both kinds are fatal to the session: no partial data is kept and the only
/// recovery is restarting the load from scratch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataLoadError {
    /// The tabular resource could not be retrieved
    #[error("Error loading wine data: {0}")]
    Transport(String),

    /// The resource was retrieved but could not be parsed into rows
    #[error("Error parsing CSV: {0}")]
    Parse(String),
}

impl DataLoadError {
    /// Short machine-readable kind, used in API responses and events
    pub fn kind(&self) -> &'static str {
        match self {
            DataLoadError::Transport(_) => "transport",
            DataLoadError::Parse(_) => "parse",
        }
    }
}

/// Common error types across the catalog crates
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog data could not be loaded
    #[error(transparent)]
    Load(#[from] DataLoadError),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not allowed in the current session state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}
