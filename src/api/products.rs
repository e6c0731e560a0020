use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::{ApiResponse, Client, Paged, QueryParams};

/// A DefectDojo Product as it appears on the wire.
///
/// Required fields deserialize to their zero value when the server omits
/// them; optional fields are `None` when absent so an omitted field is
/// distinguishable from an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub prod_type: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_criticality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_full_risk_acceptance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_simple_risk_acceptance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_audience: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internet_accessible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prod_numeric_grade: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_manager: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_manager: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_contact: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_records: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulations: Option<Vec<i64>>,
}

const BASE_PATH: &str = "/api/v2/products/";

/// Typed CRUD operations on `/api/v2/products/`.
#[derive(Clone)]
pub struct ProductsEndpoint {
    client: Client,
}

impl ProductsEndpoint {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, body: &Product) -> Result<ApiResponse<Product>, ApiError> {
        self.client.post(BASE_PATH, body).await
    }

    pub async fn retrieve(&self, id: i64) -> Result<ApiResponse<Product>, ApiError> {
        self.client.get(&format!("{}{}/", BASE_PATH, id)).await
    }

    pub async fn update(&self, id: i64, body: &Product) -> Result<ApiResponse<Product>, ApiError> {
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
    ) -> Result<ApiResponse<Paged<Product>>, ApiError> {
        let query = QueryParams::new()
            .add_optional("id", id)
            .add_optional("name", name)
            .to_query_string();
        self.client.get(&format!("{}{}", BASE_PATH, query)).await
    }
}
