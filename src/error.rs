use thiserror::Error;

#[derive(Error, Debug)]
pub enum StormctlError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Policy encoding error: {0}")]
    Encoding(String),

    #[error("Population store error: {0}")]
    Store(String),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StormctlError>;
