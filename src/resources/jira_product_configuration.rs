//! The `defectdojo_jira_product_configuration` resource.
//!
//! Links a product or an engagement to a JIRA instance. The API accepts a
//! record with neither set but such a record is useless, so configuration
//! validation rejects it up front.

use async_trait::async_trait;

use crate::api::{ApiError, ApiResponse, Client, JiraProductConfigurationsEndpoint, JiraProject};
use crate::crud::{ReadOutcome, RemoteResource, ResourceLifecycle};
use crate::framework::{
    AttributeBuilder, Config, Diagnostics, Resource, ResourceSchema, SchemaBuilder, State, Value,
};
use crate::mapping::{pair, PairingSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JiraProductConfigurationModel {
    pub id: Value<String>,
    pub project_key: Value<String>,
    pub issue_template_dir: Value<String>,
    pub push_all_issues: Value<bool>,
    pub enable_engagement_epic_mapping: Value<bool>,
    pub push_notes: Value<bool>,
    pub product_jira_sla_notification: Value<bool>,
    pub risk_acceptance_expiration_notification: Value<bool>,
    pub jira_instance_id: Value<String>,
    pub product_id: Value<String>,
    pub engagement_id: Value<String>,
}

impl JiraProductConfigurationModel {
    pub fn from_object(obj: &Config) -> Self {
        Self {
            id: obj.get_string("id"),
            project_key: obj.get_string("project_key"),
            issue_template_dir: obj.get_string("issue_template_dir"),
            push_all_issues: obj.get_bool("push_all_issues"),
            enable_engagement_epic_mapping: obj.get_bool("enable_engagement_epic_mapping"),
            push_notes: obj.get_bool("push_notes"),
            product_jira_sla_notification: obj.get_bool("product_jira_sla_notification"),
            risk_acceptance_expiration_notification: obj
                .get_bool("risk_acceptance_expiration_notification"),
            jira_instance_id: obj.get_string("jira_instance_id"),
            product_id: obj.get_string("product_id"),
            engagement_id: obj.get_string("engagement_id"),
        }
    }

    pub fn to_object(&self) -> State {
        let mut obj = State::new();
        obj.set_string("id", &self.id);
        obj.set_string("project_key", &self.project_key);
        obj.set_string("issue_template_dir", &self.issue_template_dir);
        obj.set_bool("push_all_issues", &self.push_all_issues);
        obj.set_bool("enable_engagement_epic_mapping", &self.enable_engagement_epic_mapping);
        obj.set_bool("push_notes", &self.push_notes);
        obj.set_bool("product_jira_sla_notification", &self.product_jira_sla_notification);
        obj.set_bool(
            "risk_acceptance_expiration_notification",
            &self.risk_acceptance_expiration_notification,
        );
        obj.set_string("jira_instance_id", &self.jira_instance_id);
        obj.set_string("product_id", &self.product_id);
        obj.set_string("engagement_id", &self.engagement_id);
        obj
    }
}

pub(crate) fn pairings() -> PairingSet<JiraProductConfigurationModel, JiraProject> {
    vec![
        pair::string_id(
            "id",
            |m: &JiraProductConfigurationModel| &m.id,
            |m| &mut m.id,
            |j: &JiraProject| &j.id,
            |j| &mut j.id,
        ),
        pair::opt_string(
            "project_key",
            |m: &JiraProductConfigurationModel| &m.project_key,
            |m| &mut m.project_key,
            |j: &JiraProject| &j.project_key,
            |j| &mut j.project_key,
        ),
        pair::opt_string(
            "issue_template_dir",
            |m: &JiraProductConfigurationModel| &m.issue_template_dir,
            |m| &mut m.issue_template_dir,
            |j: &JiraProject| &j.issue_template_dir,
            |j| &mut j.issue_template_dir,
        ),
        pair::opt_bool(
            "push_all_issues",
            |m: &JiraProductConfigurationModel| &m.push_all_issues,
            |m| &mut m.push_all_issues,
            |j: &JiraProject| &j.push_all_issues,
            |j| &mut j.push_all_issues,
        ),
        pair::opt_bool(
            "enable_engagement_epic_mapping",
            |m: &JiraProductConfigurationModel| &m.enable_engagement_epic_mapping,
            |m| &mut m.enable_engagement_epic_mapping,
            |j: &JiraProject| &j.enable_engagement_epic_mapping,
            |j| &mut j.enable_engagement_epic_mapping,
        ),
        pair::opt_bool(
            "push_notes",
            |m: &JiraProductConfigurationModel| &m.push_notes,
            |m| &mut m.push_notes,
            |j: &JiraProject| &j.push_notes,
            |j| &mut j.push_notes,
        ),
        pair::opt_bool(
            "product_jira_sla_notification",
            |m: &JiraProductConfigurationModel| &m.product_jira_sla_notification,
            |m| &mut m.product_jira_sla_notification,
            |j: &JiraProject| &j.product_jira_sla_notification,
            |j| &mut j.product_jira_sla_notification,
        ),
        pair::opt_bool(
            "risk_acceptance_expiration_notification",
            |m: &JiraProductConfigurationModel| &m.risk_acceptance_expiration_notification,
            |m| &mut m.risk_acceptance_expiration_notification,
            |j: &JiraProject| &j.risk_acceptance_expiration_notification,
            |j| &mut j.risk_acceptance_expiration_notification,
        ),
        pair::opt_string_id(
            "jira_instance_id",
            |m: &JiraProductConfigurationModel| &m.jira_instance_id,
            |m| &mut m.jira_instance_id,
            |j: &JiraProject| &j.jira_instance,
            |j| &mut j.jira_instance,
        ),
        pair::opt_string_id(
            "product_id",
            |m: &JiraProductConfigurationModel| &m.product_id,
            |m| &mut m.product_id,
            |j: &JiraProject| &j.product,
            |j| &mut j.product,
        ),
        pair::opt_string_id(
            "engagement_id",
            |m: &JiraProductConfigurationModel| &m.engagement_id,
            |m| &mut m.engagement_id,
            |j: &JiraProject| &j.engagement,
            |j| &mut j.engagement,
        ),
    ]
}

pub(crate) struct JiraProductConfigurationRemote {
    api: JiraProductConfigurationsEndpoint,
}

#[async_trait]
impl RemoteResource for JiraProductConfigurationRemote {
    type Local = JiraProductConfigurationModel;
    type Remote = JiraProject;

    fn type_label(&self) -> &'static str {
        "jira product configuration"
    }

    fn pairings(&self) -> PairingSet<JiraProductConfigurationModel, JiraProject> {
        pairings()
    }

    fn id_of(&self, local: &JiraProductConfigurationModel) -> Value<String> {
        local.id.clone()
    }

    async fn api_create(&self, body: &JiraProject) -> Result<ApiResponse<JiraProject>, ApiError> {
        self.api.create(body).await
    }

    async fn api_retrieve(&self, id: i64) -> Result<ApiResponse<JiraProject>, ApiError> {
        self.api.retrieve(id).await
    }

    async fn api_update(
        &self,
        id: i64,
        body: &JiraProject,
    ) -> Result<ApiResponse<JiraProject>, ApiError> {
        self.api.update(id, body).await
    }

    async fn api_destroy(&self, id: i64) -> Result<ApiResponse<()>, ApiError> {
        self.api.destroy(id).await
    }
}

pub struct JiraProductConfigurationResource {
    lifecycle: ResourceLifecycle<JiraProductConfigurationRemote>,
}

impl JiraProductConfigurationResource {
    pub fn new(client: Client) -> Self {
        Self {
            lifecycle: ResourceLifecycle::new(JiraProductConfigurationRemote {
                api: JiraProductConfigurationsEndpoint::new(client),
            }),
        }
    }

    pub fn schema_static() -> ResourceSchema {
        SchemaBuilder::new()
            .attribute(
                "id",
                AttributeBuilder::string("id")
                    .computed()
                    .description("The identifier of the JIRA product configuration."),
            )
            .attribute(
                "project_key",
                AttributeBuilder::string("project_key")
                    .optional()
                    .description("The JIRA project key issues are filed under."),
            )
            .attribute(
                "issue_template_dir",
                AttributeBuilder::string("issue_template_dir")
                    .optional()
                    .description("The template directory used to render JIRA issue descriptions."),
            )
            .attribute(
                "push_all_issues",
                AttributeBuilder::bool("push_all_issues")
                    .optional()
                    .computed()
                    .description("Whether every finding is pushed to JIRA automatically."),
            )
            .attribute(
                "enable_engagement_epic_mapping",
                AttributeBuilder::bool("enable_engagement_epic_mapping")
                    .optional()
                    .computed()
                    .description("Whether engagements map to JIRA epics."),
            )
            .attribute(
                "push_notes",
                AttributeBuilder::bool("push_notes")
                    .optional()
                    .computed()
                    .description("Whether finding notes are pushed to JIRA as comments."),
            )
            .attribute(
                "product_jira_sla_notification",
                AttributeBuilder::bool("product_jira_sla_notification")
                    .optional()
                    .computed()
                    .description("Whether SLA notifications are sent to JIRA."),
            )
            .attribute(
                "risk_acceptance_expiration_notification",
                AttributeBuilder::bool("risk_acceptance_expiration_notification")
                    .optional()
                    .computed()
                    .description("Whether risk acceptance expirations are sent to JIRA."),
            )
            .attribute(
                "jira_instance_id",
                AttributeBuilder::string("jira_instance_id")
                    .optional()
                    .description("The identifier of the JIRA instance to file issues in."),
            )
            .attribute(
                "product_id",
                AttributeBuilder::string("product_id")
                    .optional()
                    .description("The identifier of the product this configuration applies to."),
            )
            .attribute(
                "engagement_id",
                AttributeBuilder::string("engagement_id")
                    .optional()
                    .description("The identifier of the engagement this configuration applies to."),
            )
            .build_resource(0)
    }
}

#[async_trait]
impl Resource for JiraProductConfigurationResource {
    fn schema(&self) -> ResourceSchema {
        Self::schema_static()
    }

    async fn validate(&self, config: &Config) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let model = JiraProductConfigurationModel::from_object(config);
        if model.product_id.is_null() && model.engagement_id.is_null() {
            diags.add_error(
                "Invalid JIRA Product Configuration",
                "Either the product_id or the engagement_id attribute must be set.",
            );
        }
        diags
    }

    async fn create(&self, config: Config) -> (Option<State>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let plan = JiraProductConfigurationModel::from_object(&config);
        let state = self.lifecycle.create(plan, &mut diags).await;
        (state.map(|m| m.to_object()), diags)
    }

    async fn read(&self, state: State) -> (Option<State>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let prior = JiraProductConfigurationModel::from_object(&state);
        match self.lifecycle.read(prior, &mut diags).await {
            ReadOutcome::Current(refreshed) => (Some(refreshed.to_object()), diags),
            ReadOutcome::Gone | ReadOutcome::Failed => (None, diags),
        }
    }

    async fn update(&self, plan: State) -> (Option<State>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let plan = JiraProductConfigurationModel::from_object(&plan);
        let state = self.lifecycle.update(plan, &mut diags).await;
        (state.map(|m| m.to_object()), diags)
    }

    async fn delete(&self, state: State) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let prior = JiraProductConfigurationModel::from_object(&state);
        self.lifecycle.delete(prior, &mut diags).await;
        diags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Client;
    use crate::framework::Dynamic;
    use crate::mapping;

    fn resource() -> JiraProductConfigurationResource {
        let client = Client::new("http://localhost:1", "key", false).unwrap();
        JiraProductConfigurationResource::new(client)
    }

    #[tokio::test]
    async fn validate_requires_a_product_or_an_engagement() {
        let config = Config::new();
        let diags = resource().validate(&config).await;
        assert!(diags.has_errors());
        assert!(diags.errors[0].detail.contains("product_id or the engagement_id"));
    }

    #[tokio::test]
    async fn validate_accepts_a_product_link() {
        let mut config = Config::new();
        config
            .values
            .insert("product_id".to_string(), Dynamic::String("4".into()));
        let diags = resource().validate(&config).await;
        assert!(!diags.has_errors());
    }

    #[test]
    fn reference_ids_convert_to_integers() {
        let model = JiraProductConfigurationModel {
            project_key: Value::Known("SEC".into()),
            jira_instance_id: Value::Known("2".into()),
            product_id: Value::Known("4".into()),
            ..Default::default()
        };
        let mut wire = JiraProject::default();
        let diags = mapping::to_remote(&pairings(), &model, &mut wire);

        assert!(!diags.has_errors());
        assert_eq!(wire.project_key.as_deref(), Some("SEC"));
        assert_eq!(wire.jira_instance, Some(2));
        assert_eq!(wire.product, Some(4));
        assert_eq!(wire.engagement, None);
    }

    #[test]
    fn reference_ids_convert_back_to_strings() {
        let wire = JiraProject {
            id: 11,
            engagement: Some(8),
            ..Default::default()
        };
        let mut model = JiraProductConfigurationModel::default();
        let diags = mapping::to_local(&pairings(), &wire, &mut model);

        assert!(!diags.has_errors());
        assert_eq!(model.id, Value::Known("11".to_string()));
        assert_eq!(model.engagement_id, Value::Known("8".to_string()));
        assert_eq!(model.product_id, Value::Null);
    }
}
