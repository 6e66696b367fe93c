use keggraph_core::{EquationShapeError, RecordParseError};

use crate::config::ConfigError;

/// Result type for remote resolution passes.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// A remote fetch failed. The pass that issued it aborts.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("no response available for {url}")]
    Missing { url: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Missing { url } => Some(url),
            FetchError::Client(_) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] RecordParseError),

    #[error(transparent)]
    Equation(#[from] EquationShapeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
