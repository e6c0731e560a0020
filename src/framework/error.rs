//! Error types for the provider surface.

/// Errors raised outside the diagnostics channel: registry lookups and
/// provider wiring. Everything that happens during a lifecycle RPC is
/// reported as diagnostics instead.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Resource type not found: {0}")]
    ResourceNotFound(String),

    #[error("Data source type not found: {0}")]
    DataSourceNotFound(String),

    #[error("Provider not configured")]
    NotConfigured,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{0}")]
    Custom(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

impl From<String> for ProviderError {
    fn from(s: String) -> Self {
        ProviderError::Custom(s)
    }
}

impl From<&str> for ProviderError {
    fn from(s: &str) -> Self {
        ProviderError::Custom(s.to_string())
    }
}
