use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum PolarError {
    #[error("config error: {0}")]
    Config(String),

    #[error("sampler error: {0}")]
    Sampler(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = PolarError> = std::result::Result<T, E>;
