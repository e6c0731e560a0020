use thiserror::Error;

/// Transport-level failures talking to DefectDojo. HTTP error statuses are
/// not errors at this layer; they come back inside [`super::ApiResponse`] so
/// the lifecycle code can interpret them.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}
