use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unexpected response shape from {url}: {reason}")]
    UnexpectedShape { url: String, reason: String },

    #[error("Unknown indicator code: {0}")]
    UnknownIndicator(String),
}

pub type Result<T> = std::result::Result<T, IndicatorError>;
