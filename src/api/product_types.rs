use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::{ApiResponse, Client, Paged, QueryParams};

/// A DefectDojo Product Type as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductType {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_product: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_product: Option<bool>,
}

const BASE_PATH: &str = "/api/v2/product_types/";

/// Typed CRUD operations on `/api/v2/product_types/`.
#[derive(Clone)]
pub struct ProductTypesEndpoint {
    client: Client,
}

impl ProductTypesEndpoint {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, body: &ProductType) -> Result<ApiResponse<ProductType>, ApiError> {
        self.client.post(BASE_PATH, body).await
    }

    pub async fn retrieve(&self, id: i64) -> Result<ApiResponse<ProductType>, ApiError> {
        self.client.get(&format!("{}{}/", BASE_PATH, id)).await
    }

    pub async fn update(
        &self,
        id: i64,
        body: &ProductType,
    ) -> Result<ApiResponse<ProductType>, ApiError> {
        self.client
            .put(&format!("{}{}/", BASE_PATH, id), body)
            .await
    }

    pub async fn destroy(&self, id: i64) -> Result<ApiResponse<()>, ApiError> {
        self.client.delete(&format!("{}{}/", BASE_PATH, id)).await
    }

    pub async fn list(
        &self,
        id: Option<i64>,
        name: Option<&str>,
    ) -> Result<ApiResponse<Paged<ProductType>>, ApiError> {
        let query = QueryParams::new()
            .add_optional("id", id)
            .add_optional("name", name)
            .to_query_string();
        self.client.get(&format!("{}{}", BASE_PATH, query)).await
    }
}
