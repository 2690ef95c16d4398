#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch data: {0}")]
    FetchError(String),

    #[error("Error parsing content: {0}")]
    ParseError(String),

    #[error("No listing page for state: {0}")]
    UnknownStateError(String),

    #[error("Invalid JSON response: {0}")]
    JsonError(String),

    #[error("Failed to write cache: {0}")]
    CacheError(String),

    #[error("Console I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// A required element was not present on `page`.
    pub fn missing(element: &str, page: &str) -> Self {
        AppError::ParseError(format!("no {} on {}", element, page))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
