//! Error types for bindscan

use thiserror::Error;

/// bindscan error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for bindscan
pub type Result<T> = std::result::Result<T, Error>;
