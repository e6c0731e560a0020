//! DefectDojo REST API client.
//!
//! Thin typed wrappers over the `/api/v2/` endpoints used by this provider.
//! Calls resolve to an [`ApiResponse`] carrying the HTTP status, the raw
//! body and the decoded object (when the status is a success); only
//! transport failures surface as [`ApiError`].

pub mod client;
pub mod error;
pub mod jira_product_configurations;
pub mod product_types;
pub mod products;

pub use client::Client;
pub use error::ApiError;
pub use jira_product_configurations::{JiraProductConfigurationsEndpoint, JiraProject};
pub use product_types::{ProductType, ProductTypesEndpoint};
pub use products::{Product, ProductsEndpoint};

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// One HTTP exchange with the API: status code, raw body for diagnostics,
/// and the decoded object when the server reported success.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub body: String,
    pub data: Option<T>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decodes the body only on success statuses; error bodies are kept raw
    /// for diagnostics.
    pub(crate) fn from_body(status: u16, body: String) -> Result<Self, ApiError> {
        let data = if (200..300).contains(&status) && !body.is_empty() {
            Some(
                serde_json::from_str(&body)
                    .map_err(|e| ApiError::Parse(format!("HTTP {}: {}", status, e)))?,
            )
        } else {
            None
        };
        Ok(Self { status, body, data })
    }
}

impl ApiResponse<()> {
    pub(crate) fn empty(status: u16, body: String) -> Self {
        Self {
            status,
            body,
            data: None,
        }
    }
}

/// The list envelope DefectDojo wraps collection responses in.
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Query-string builder for list endpoints.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn add_optional<K: Into<String>, V: ToString>(self, key: K, value: Option<V>) -> Self {
        match value {
            Some(v) => self.add(key, v),
            None => self,
        }
    }

    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            String::new()
        } else {
            format!(
                "?{}",
                self.params
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                    .collect::<Vec<_>>()
                    .join("&")
            )
        }
    }
}
