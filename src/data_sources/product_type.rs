//! The `defectdojo_product_type` data source.

use async_trait::async_trait;

use crate::api::{Client, ProductTypesEndpoint};
use crate::crud::unexpected_status;
use crate::data_sources::lookup_params;
use crate::framework::{
    AttributeBuilder, Config, DataSource, DataSourceSchema, Diagnostics, SchemaBuilder, State,
};
use crate::mapping;
use crate::resources::product_type::{pairings, ProductTypeModel};

pub struct ProductTypeDataSource {
    api: ProductTypesEndpoint,
}

impl ProductTypeDataSource {
    pub fn new(client: Client) -> Self {
        Self {
            api: ProductTypesEndpoint::new(client),
        }
    }

    pub fn schema_static() -> DataSourceSchema {
        SchemaBuilder::new()
            .attribute(
                "id",
                AttributeBuilder::string("id")
                    .optional()
                    .computed()
                    .description("The identifier of the product type to look up."),
            )
            .attribute(
                "name",
                AttributeBuilder::string("name")
                    .optional()
                    .computed()
                    .description("The name of the product type to look up."),
            )
            .attribute(
                "description",
                AttributeBuilder::string("description").computed(),
            )
            .attribute(
                "critical_product",
                AttributeBuilder::bool("critical_product").computed(),
            )
            .attribute(
                "key_product",
                AttributeBuilder::bool("key_product").computed(),
            )
            .build_data_source(0)
    }
}

#[async_trait]
impl DataSource for ProductTypeDataSource {
    fn schema(&self) -> DataSourceSchema {
        Self::schema_static()
    }

    async fn read(&self, config: Config) -> (Option<State>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let mut model = ProductTypeModel::from_object(&config);

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
                    "No product type matched the given parameters.",
                );
                (None, diags)
            }
            n => {
                diags.add_error(
                    "Error Reading Data Source",
                    format!(
                        "{} product types matched the given parameters; expected exactly one.",
                        n
                    ),
                );
                (None, diags)
            }
        }
    }
}
