//! Terraform provider for DefectDojo.
//!
//! Resource and data source implementations sit on a shared mapping layer
//! (`mapping`) that moves values between tri-state attribute models and the
//! API structs, and a shared lifecycle (`crud`) that turns API responses
//! into state updates and diagnostics.

pub mod api;
pub mod crud;
pub mod data_sources;
pub mod framework;
pub mod mapping;
pub mod resources;

use std::collections::HashMap;

use async_trait::async_trait;

use framework::{
    AttributeBuilder, Config, DataSource, DataSourceSchema, Diagnostics, Provider, ProviderError,
    Resource, ResourceSchema, SchemaBuilder,
};

pub struct DefectdojoProvider {
    client: Option<api::Client>,
}

impl Default for DefectdojoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefectdojoProvider {
    pub fn new() -> Self {
        Self { client: None }
    }

    pub fn schema_static() -> DataSourceSchema {
        SchemaBuilder::new()
            .attribute(
                "base_url",
                AttributeBuilder::string("base_url")
                    .optional()
                    .description("The DefectDojo base URL. Falls back to DEFECTDOJO_BASEURL."),
            )
            .attribute(
                "api_key",
                AttributeBuilder::string("api_key")
                    .optional()
                    .sensitive()
                    .description("The DefectDojo API v2 key. Falls back to DEFECTDOJO_APIKEY."),
            )
            .attribute(
                "insecure",
                AttributeBuilder::bool("insecure")
                    .optional()
                    .description("Skip TLS certificate verification."),
            )
            .build_data_source(0)
    }

    fn configured_client(&self) -> framework::Result<api::Client> {
        self.client.as_ref().cloned().ok_or(ProviderError::NotConfigured)
    }
}

#[async_trait]
impl Provider for DefectdojoProvider {
    async fn configure(&mut self, config: Config) -> Diagnostics {
        let base_url = config
            .values
            .get("base_url")
            .and_then(|v| v.as_string())
            .map(|s| s.to_string())
            .or_else(|| std::env::var("DEFECTDOJO_BASEURL").ok());

        let api_key = config
            .values
            .get("api_key")
            .and_then(|v| v.as_string())
            .map(|s| s.to_string())
            .or_else(|| std::env::var("DEFECTDOJO_APIKEY").ok());

        let insecure = config
            .values
            .get("insecure")
            .and_then(|v| v.as_bool())
            .or_else(|| {
                std::env::var("DEFECTDOJO_INSECURE")
                    .ok()
                    .and_then(|v| v.parse::<bool>().ok())
            })
            .unwrap_or(false);

        let mut diags = Diagnostics::new();

        match (base_url, api_key) {
            (Some(base_url), Some(api_key)) => {
                match api::Client::new(&base_url, &api_key, insecure) {
                    Ok(client) => self.client = Some(client),
                    Err(e) => diags.add_error(
                        "Failed to create API client",
                        format!("The provider could not be configured: {}", e),
                    ),
                }
            }
            (None, _) => diags.add_error(
                "Missing base_url",
                "base_url is required (set it in the provider config or DEFECTDOJO_BASEURL).",
            ),
            (_, None) => diags.add_error(
                "Missing api_key",
                "api_key is required (set it in the provider config or DEFECTDOJO_APIKEY).",
            ),
        }

        diags
    }

    fn resource_schemas(&self) -> HashMap<String, ResourceSchema> {
        let mut schemas = HashMap::new();
        schemas.insert(
            "defectdojo_product".to_string(),
            resources::ProductResource::schema_static(),
        );
        schemas.insert(
            "defectdojo_product_type".to_string(),
            resources::ProductTypeResource::schema_static(),
        );
        schemas.insert(
            "defectdojo_jira_product_configuration".to_string(),
            resources::JiraProductConfigurationResource::schema_static(),
        );
        schemas
    }

    fn data_source_schemas(&self) -> HashMap<String, DataSourceSchema> {
        let mut schemas = HashMap::new();
        schemas.insert(
            "defectdojo_product".to_string(),
            data_sources::ProductDataSource::schema_static(),
        );
        schemas.insert(
            "defectdojo_product_type".to_string(),
            data_sources::ProductTypeDataSource::schema_static(),
        );
        schemas
    }

    fn create_resource(&self, name: &str) -> framework::Result<Box<dyn Resource>> {
        let client = self.configured_client()?;
        match name {
            "defectdojo_product" => Ok(Box::new(resources::ProductResource::new(client))),
            "defectdojo_product_type" => Ok(Box::new(resources::ProductTypeResource::new(client))),
            "defectdojo_jira_product_configuration" => Ok(Box::new(
                resources::JiraProductConfigurationResource::new(client),
            )),
            _ => Err(ProviderError::ResourceNotFound(name.to_string())),
        }
    }

    fn create_data_source(&self, name: &str) -> framework::Result<Box<dyn DataSource>> {
        let client = self.configured_client()?;
        match name {
            "defectdojo_product" => Ok(Box::new(data_sources::ProductDataSource::new(client))),
            "defectdojo_product_type" => {
                Ok(Box::new(data_sources::ProductTypeDataSource::new(client)))
            }
            _ => Err(ProviderError::DataSourceNotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("DEFECTDOJO_BASEURL");
        std::env::remove_var("DEFECTDOJO_APIKEY");
        std::env::remove_var("DEFECTDOJO_INSECURE");
    }

    #[tokio::test]
    #[serial]
    async fn provider_configures_from_env_vars() {
        std::env::set_var("DEFECTDOJO_BASEURL", "https://defectdojo.example.com");
        std::env::set_var("DEFECTDOJO_APIKEY", "secret");
        std::env::set_var("DEFECTDOJO_INSECURE", "true");

        let mut provider = DefectdojoProvider::new();
        let diags = provider.configure(Config::new()).await;

        assert!(!diags.has_errors());
        assert!(provider.client.is_some());

        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn provider_configure_requires_base_url() {
        clear_env();
        std::env::set_var("DEFECTDOJO_APIKEY", "secret");

        let mut provider = DefectdojoProvider::new();
        let diags = provider.configure(Config::new()).await;

        assert!(diags.has_errors());
        assert_eq!(diags.errors[0].summary, "Missing base_url");

        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn provider_configure_requires_api_key() {
        clear_env();
        std::env::set_var("DEFECTDOJO_BASEURL", "https://defectdojo.example.com");

        let mut provider = DefectdojoProvider::new();
        let diags = provider.configure(Config::new()).await;

        assert!(diags.has_errors());
        assert_eq!(diags.errors[0].summary, "Missing api_key");

        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn provider_creates_resources_after_configuration() {
        std::env::set_var("DEFECTDOJO_BASEURL", "https://defectdojo.example.com");
        std::env::set_var("DEFECTDOJO_APIKEY", "secret");

        let mut provider = DefectdojoProvider::new();
        provider.configure(Config::new()).await;

        assert!(provider.create_resource("defectdojo_product").is_ok());
        assert!(provider.create_resource("defectdojo_product_type").is_ok());
        assert!(provider
            .create_resource("defectdojo_jira_product_configuration")
            .is_ok());
        assert!(provider.create_resource("defectdojo_engagement").is_err());

        assert!(provider.create_data_source("defectdojo_product").is_ok());
        assert!(provider.create_data_source("defectdojo_finding").is_err());

        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn unconfigured_provider_cannot_create_resources() {
        clear_env();
        let provider = DefectdojoProvider::new();
        assert!(matches!(
            provider.create_resource("defectdojo_product"),
            Err(ProviderError::NotConfigured)
        ));
    }

    #[test]
    fn schemas_cover_every_registered_name() {
        let provider = DefectdojoProvider::new();
        let resources = provider.resource_schemas();
        assert_eq!(resources.len(), 3);
        assert!(resources.contains_key("defectdojo_jira_product_configuration"));

        let data_sources = provider.data_source_schemas();
        assert_eq!(data_sources.len(), 2);
    }
}
