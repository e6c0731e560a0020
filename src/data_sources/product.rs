//! The `defectdojo_product` data source.

use async_trait::async_trait;

use crate::api::{Client, ProductsEndpoint};
use crate::crud::unexpected_status;
use crate::data_sources::lookup_params;
use crate::framework::{
    AttributeBuilder, Config, DataSource, DataSourceSchema, Diagnostics, SchemaBuilder, State,
};
use crate::mapping;
use crate::resources::product::{pairings, ProductModel};

pub struct ProductDataSource {
    api: ProductsEndpoint,
}

impl ProductDataSource {
    pub fn new(client: Client) -> Self {
        Self {
            api: ProductsEndpoint::new(client),
        }
    }

    pub fn schema_static() -> DataSourceSchema {
        SchemaBuilder::new()
            .attribute(
                "id",
                AttributeBuilder::string("id")
                    .optional()
                    .computed()
                    .description("The identifier of the product to look up."),
            )
            .attribute(
                "name",
                AttributeBuilder::string("name")
                    .optional()
                    .computed()
                    .description("The name of the product to look up."),
            )
            .attribute(
                "description",
                AttributeBuilder::string("description").computed(),
            )
            .attribute(
                "product_type_id",
                AttributeBuilder::number("product_type_id").computed(),
            )
            .attribute(
                "business_criticality",
                AttributeBuilder::string("business_criticality").computed(),
            )
            .attribute("platform", AttributeBuilder::string("platform").computed())
            .attribute("lifecycle", AttributeBuilder::string("lifecycle").computed())
            .attribute("origin", AttributeBuilder::string("origin").computed())
            .attribute("revenue", AttributeBuilder::string("revenue").computed())
            .attribute(
                "enable_full_risk_acceptance",
                AttributeBuilder::bool("enable_full_risk_acceptance").computed(),
            )
            .attribute(
                "enable_simple_risk_acceptance",
                AttributeBuilder::bool("enable_simple_risk_acceptance").computed(),
            )
            .attribute(
                "external_audience",
                AttributeBuilder::bool("external_audience").computed(),
            )
            .attribute(
                "internet_accessible",
                AttributeBuilder::bool("internet_accessible").computed(),
            )
            .attribute(
                "prod_numeric_grade",
                AttributeBuilder::number("prod_numeric_grade").computed(),
            )
            .attribute(
                "product_manager_id",
                AttributeBuilder::number("product_manager_id").computed(),
            )
            .attribute(
                "team_manager_id",
                AttributeBuilder::number("team_manager_id").computed(),
            )
            .attribute(
                "technical_contact_id",
                AttributeBuilder::number("technical_contact_id").computed(),
            )
            .attribute(
                "user_records",
                AttributeBuilder::number("user_records").computed(),
            )
            .attribute("tags", AttributeBuilder::string_set("tags").computed())
            .attribute(
                "regulation_ids",
                AttributeBuilder::number_set("regulation_ids").computed(),
            )
            .build_data_source(0)
    }
}

#[async_trait]
impl DataSource for ProductDataSource {
    fn schema(&self) -> DataSourceSchema {
        Self::schema_static()
    }

    async fn read(&self, config: Config) -> (Option<State>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let mut model = ProductModel::from_object(&config);

        let (id, name) = match lookup_params(&model.id, &model.name, &mut diags) {
            Some(params) => params,
            None => return (None, diags),
        };

        let response = match self.api.list(id, name.as_deref()).await {
            Ok(response) => response,
            Err(e) => {
                diags.add_error("Error Reading Data Source", e.to_string());
                return (None, diags);
            }
        };

        if response.status != 200 {
            diags.add_error(
                "API Error Reading Data Source",
                unexpected_status(response.status, &response.body),
            );
            return (None, diags);
        }

        let page = match response.data {
            Some(page) => page,
            None => {
                diags.add_error(
                    "API Error Reading Data Source",
                    "The API returned 200 without a response body.",
                );
                return (None, diags);
            }
        };

        match page.count {
            1 => match page.results.first() {
                Some(result) => {
                    diags.extend(mapping::to_local(&pairings(), result, &mut model));
                    (Some(model.to_object()), diags)
                }
                None => {
                    diags.add_error(
                        "API Error Reading Data Source",
                        "The API reported one match but returned an empty result list.",
                    );
                    (None, diags)
                }
            },
            0 => {
                diags.add_error(
                    "Error Reading Data Source",
                    "No product matched the given parameters.",
                );
                (None, diags)
            }
            n => {
                diags.add_error(
                    "Error Reading Data Source",
                    format!("{} products matched the given parameters; expected exactly one.", n),
                );
                (None, diags)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{Dynamic, Value};

    fn config_with(name: &str, value: Dynamic) -> Config {
        let mut config = Config::new();
        config.values.insert(name.to_string(), value);
        config
    }

    #[tokio::test]
    async fn read_by_name_returns_the_single_match() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v2/products/?name=app")
            .with_status(200)
            .with_body(
                r#"{"count": 1, "next": null, "previous": null, "results": [
                    {"id": 5, "name": "app", "description": "d", "prod_type": 2,
                     "tags": ["prod"]}
                ]}"#,
            )
            .create_async()
            .await;

        let client = Client::new(&server.url(), "key", false).unwrap();
        let data_source = ProductDataSource::new(client);

        let (state, diags) = data_source
            .read(config_with("name", Dynamic::String("app".into())))
            .await;

        assert!(!diags.has_errors());
        let state = state.unwrap();
        assert_eq!(state.get_string("id"), Value::Known("5".to_string()));
        assert_eq!(state.get_int("product_type_id"), Value::Known(2));
        let tags: std::collections::BTreeSet<String> = ["prod".to_string()].into();
        assert_eq!(state.get_string_set("tags"), Value::Known(tags));
    }

    #[tokio::test]
    async fn read_errors_when_nothing_matches() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v2/products/?name=ghost")
            .with_status(200)
            .with_body(r#"{"count": 0, "next": null, "previous": null, "results": []}"#)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "key", false).unwrap();
        let data_source = ProductDataSource::new(client);

        let (state, diags) = data_source
            .read(config_with("name", Dynamic::String("ghost".into())))
            .await;

        assert!(state.is_none());
        assert!(diags.errors[0].detail.contains("No product matched"));
    }

    #[tokio::test]
    async fn read_errors_when_multiple_match() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v2/products/?name=app")
            .with_status(200)
            .with_body(
                r#"{"count": 2, "next": null, "previous": null, "results": [
                    {"id": 1, "name": "app", "description": "", "prod_type": 1},
                    {"id": 2, "name": "app", "description": "", "prod_type": 1}
                ]}"#,
            )
            .create_async()
            .await;

        let client = Client::new(&server.url(), "key", false).unwrap();
        let data_source = ProductDataSource::new(client);

        let (state, diags) = data_source
            .read(config_with("name", Dynamic::String("app".into())))
            .await;

        assert!(state.is_none());
        assert!(diags.errors[0].detail.contains("expected exactly one"));
    }

    #[tokio::test]
    async fn read_errors_when_the_count_disagrees_with_the_results() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v2/products/?name=app")
            .with_status(200)
            .with_body(r#"{"count": 1, "next": null, "previous": null, "results": []}"#)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "key", false).unwrap();
        let data_source = ProductDataSource::new(client);

        let (state, diags) = data_source
            .read(config_with("name", Dynamic::String("app".into())))
            .await;

        assert!(state.is_none());
        assert!(diags.errors[0].detail.contains("empty result list"));
    }

    #[tokio::test]
    async fn read_requires_id_or_name() {
        let client = Client::new("http://localhost:1", "key", false).unwrap();
        let data_source = ProductDataSource::new(client);

        let (state, diags) = data_source.read(Config::new()).await;

        assert!(state.is_none());
        assert_eq!(diags.errors[0].summary, "Could not Read Data Source");
    }
}
