use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::ClientBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::error::ApiError;
use super::ApiResponse;

/// DefectDojo API client. Cheap to clone; the underlying HTTP client and
/// connection pool are shared and safe for concurrent use across in-flight
/// resource operations.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl Client {
    pub fn new(endpoint: &str, api_key: &str, insecure: bool) -> Result<Self, ApiError> {
        Url::parse(endpoint).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", endpoint, e)))?;

        let http = ClientBuilder::new()
            .danger_accept_invalid_certs(insecure)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: endpoint.trim_end_matches('/').to_string(),
                auth_header: format!("Token {}", api_key),
            }),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ApiError> {
        let url = format!("{}{}", self.inner.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .inner
            .http
            .get(&url)
            .header(AUTHORIZATION, &self.inner.auth_header)
            .send()
            .await?;

        Self::into_response(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = format!("{}{}", self.inner.base_url, path);
        tracing::debug!("POST {}", url);

        let response = self
            .inner
            .http
            .post(&url)
            .header(AUTHORIZATION, &self.inner.auth_header)
            .json(body)
            .send()
            .await?;

        Self::into_response(response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = format!("{}{}", self.inner.base_url, path);
        tracing::debug!("PUT {}", url);

        let response = self
            .inner
            .http
            .put(&url)
            .header(AUTHORIZATION, &self.inner.auth_header)
            .json(body)
            .send()
            .await?;

        Self::into_response(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse<()>, ApiError> {
        let url = format!("{}{}", self.inner.base_url, path);
        tracing::debug!("DELETE {}", url);

        let response = self
            .inner
            .http
            .delete(&url)
            .header(AUTHORIZATION, &self.inner.auth_header)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(ApiResponse::empty(status, body))
    }

    async fn into_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>, ApiError> {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status, "API response body: {}", body);
        ApiResponse::from_body(status, body)
    }
}
