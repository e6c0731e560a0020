use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::{ApiResponse, Client};

/// A Jira project mapping as it appears on the wire: the link between a
/// Product (or Engagement) and a Jira instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraProject {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_template_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_all_issues: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_engagement_epic_mapping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_notes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_jira_sla_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_acceptance_expiration_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_instance: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement: Option<i64>,
}

const BASE_PATH: &str = "/api/v2/jira_product_configurations/";

/// Typed CRUD operations on `/api/v2/jira_product_configurations/`.
#[derive(Clone)]
pub struct JiraProductConfigurationsEndpoint {
    client: Client,
}

impl JiraProductConfigurationsEndpoint {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, body: &JiraProject) -> Result<ApiResponse<JiraProject>, ApiError> {
        self.client.post(BASE_PATH, body).await
    }

    pub async fn retrieve(&self, id: i64) -> Result<ApiResponse<JiraProject>, ApiError> {
        self.client.get(&format!("{}{}/", BASE_PATH, id)).await
    }

    pub async fn update(
        &self,
        id: i64,
        body: &JiraProject,
    ) -> Result<ApiResponse<JiraProject>, ApiError> {
        self.client
            .put(&format!("{}{}/", BASE_PATH, id), body)
            .await
    }

    pub async fn destroy(&self, id: i64) -> Result<ApiResponse<()>, ApiError> {
        self.client.delete(&format!("{}{}/", BASE_PATH, id)).await
    }
}
