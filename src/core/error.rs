use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid pattern on line {line}: {text}")]
    InvalidPattern { line: usize, text: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Curl error: {0}")]
    Curl(#[from] curl::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
