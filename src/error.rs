#[derive(Debug, thiserror::Error)]
pub enum NumismaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An upstream source could not be reached or refused the request.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// An upstream source answered with an unexpected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A response carried some, but not all, of the fields we need.
    #[error("Incomplete data: {0}")]
    PartialData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, NumismaError>;
