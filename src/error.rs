//! Error types for privamask

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The recognizer layer failed to initialize; masking is unavailable.
    #[error("Recognizer engine unavailable")]
    EngineUnavailable,

    #[error("Invalid recognizer pattern '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
