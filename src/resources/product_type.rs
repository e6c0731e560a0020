//! The `defectdojo_product_type` resource.

use async_trait::async_trait;

use crate::api::{ApiError, ApiResponse, Client, ProductType, ProductTypesEndpoint};
use crate::crud::{ReadOutcome, RemoteResource, ResourceLifecycle};
use crate::framework::{
    AttributeBuilder, Config, Diagnostics, Resource, ResourceSchema, SchemaBuilder, State, Value,
};
use crate::mapping::{pair, PairingSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductTypeModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub critical_product: Value<bool>,
    pub key_product: Value<bool>,
}

impl ProductTypeModel {
    pub fn from_object(obj: &Config) -> Self {
        Self {
            id: obj.get_string("id"),
            name: obj.get_string("name"),
            description: obj.get_string("description"),
            critical_product: obj.get_bool("critical_product"),
            key_product: obj.get_bool("key_product"),
        }
    }

    pub fn to_object(&self) -> State {
        let mut obj = State::new();
        obj.set_string("id", &self.id);
        obj.set_string("name", &self.name);
        obj.set_string("description", &self.description);
        obj.set_bool("critical_product", &self.critical_product);
        obj.set_bool("key_product", &self.key_product);
        obj
    }
}

pub(crate) fn pairings() -> PairingSet<ProductTypeModel, ProductType> {
    vec![
        pair::string_id(
            "id",
            |m: &ProductTypeModel| &m.id,
            |m| &mut m.id,
            |p: &ProductType| &p.id,
            |p| &mut p.id,
        ),
        pair::string(
            "name",
            |m: &ProductTypeModel| &m.name,
            |m| &mut m.name,
            |p: &ProductType| &p.name,
            |p| &mut p.name,
        ),
        pair::opt_string(
            "description",
            |m: &ProductTypeModel| &m.description,
            |m| &mut m.description,
            |p: &ProductType| &p.description,
            |p| &mut p.description,
        ),
        pair::opt_bool(
            "critical_product",
            |m: &ProductTypeModel| &m.critical_product,
            |m| &mut m.critical_product,
            |p: &ProductType| &p.critical_product,
            |p| &mut p.critical_product,
        ),
        pair::opt_bool(
            "key_product",
            |m: &ProductTypeModel| &m.key_product,
            |m| &mut m.key_product,
            |p: &ProductType| &p.key_product,
            |p| &mut p.key_product,
        ),
    ]
}

pub(crate) struct ProductTypeRemote {
    api: ProductTypesEndpoint,
}

#[async_trait]
impl RemoteResource for ProductTypeRemote {
    type Local = ProductTypeModel;
    type Remote = ProductType;

    fn type_label(&self) -> &'static str {
        "product type"
    }

    fn pairings(&self) -> PairingSet<ProductTypeModel, ProductType> {
        pairings()
    }

    fn id_of(&self, local: &ProductTypeModel) -> Value<String> {
        local.id.clone()
    }

    async fn api_create(&self, body: &ProductType) -> Result<ApiResponse<ProductType>, ApiError> {
        self.api.create(body).await
    }

    async fn api_retrieve(&self, id: i64) -> Result<ApiResponse<ProductType>, ApiError> {
        self.api.retrieve(id).await
    }

    async fn api_update(
        &self,
        id: i64,
        body: &ProductType,
    ) -> Result<ApiResponse<ProductType>, ApiError> {
        self.api.update(id, body).await
    }

    async fn api_destroy(&self, id: i64) -> Result<ApiResponse<()>, ApiError> {
        self.api.destroy(id).await
    }
}

pub struct ProductTypeResource {
    lifecycle: ResourceLifecycle<ProductTypeRemote>,
}

impl ProductTypeResource {
    pub fn new(client: Client) -> Self {
        Self {
            lifecycle: ResourceLifecycle::new(ProductTypeRemote {
                api: ProductTypesEndpoint::new(client),
            }),
        }
    }

    pub fn schema_static() -> ResourceSchema {
        SchemaBuilder::new()
            .attribute(
                "id",
                AttributeBuilder::string("id")
                    .computed()
                    .description("The identifier of the product type."),
            )
            .attribute(
                "name",
                AttributeBuilder::string("name")
                    .required()
                    .description("The name of the product type."),
            )
            .attribute(
                "description",
                AttributeBuilder::string("description")
                    .optional()
                    .description("A description of the product type."),
            )
            .attribute(
                "critical_product",
                AttributeBuilder::bool("critical_product")
                    .optional()
                    .computed()
                    .description("Whether products of this type are critical."),
            )
            .attribute(
                "key_product",
                AttributeBuilder::bool("key_product")
                    .optional()
                    .computed()
                    .description("Whether products of this type are key products."),
            )
            .build_resource(0)
    }
}

#[async_trait]
impl Resource for ProductTypeResource {
    fn schema(&self) -> ResourceSchema {
        Self::schema_static()
    }

    async fn create(&self, config: Config) -> (Option<State>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let plan = ProductTypeModel::from_object(&config);
        let state = self.lifecycle.create(plan, &mut diags).await;
        (state.map(|m| m.to_object()), diags)
    }

    async fn read(&self, state: State) -> (Option<State>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let prior = ProductTypeModel::from_object(&state);
        match self.lifecycle.read(prior, &mut diags).await {
            ReadOutcome::Current(refreshed) => (Some(refreshed.to_object()), diags),
            ReadOutcome::Gone | ReadOutcome::Failed => (None, diags),
        }
    }

    async fn update(&self, plan: State) -> (Option<State>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let plan = ProductTypeModel::from_object(&plan);
        let state = self.lifecycle.update(plan, &mut diags).await;
        (state.map(|m| m.to_object()), diags)
    }

    async fn delete(&self, state: State) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let prior = ProductTypeModel::from_object(&state);
        self.lifecycle.delete(prior, &mut diags).await;
        diags
    }
}
