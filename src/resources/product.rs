//! The `defectdojo_product` resource.

use async_trait::async_trait;

use crate::api::{ApiError, ApiResponse, Client, Product, ProductsEndpoint};
use crate::crud::{ReadOutcome, RemoteResource, ResourceLifecycle};
use crate::framework::{
    AttributeBuilder, Config, Diagnostics, Resource, ResourceSchema, SchemaBuilder, State, Value,
};
use crate::mapping::{pair, PairingSet};

/// Attribute values for one product instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub product_type_id: Value<i64>,
    pub business_criticality: Value<String>,
    pub platform: Value<String>,
    pub lifecycle: Value<String>,
    pub origin: Value<String>,
    pub revenue: Value<String>,
    pub enable_full_risk_acceptance: Value<bool>,
    pub enable_simple_risk_acceptance: Value<bool>,
    pub external_audience: Value<bool>,
    pub internet_accessible: Value<bool>,
    pub prod_numeric_grade: Value<i64>,
    pub product_manager_id: Value<i64>,
    pub team_manager_id: Value<i64>,
    pub technical_contact_id: Value<i64>,
    pub user_records: Value<i64>,
    pub tags: Value<std::collections::BTreeSet<String>>,
    pub regulation_ids: Value<std::collections::BTreeSet<i64>>,
}

impl ProductModel {
    pub fn from_object(obj: &Config) -> Self {
        Self {
            id: obj.get_string("id"),
            name: obj.get_string("name"),
            description: obj.get_string("description"),
            product_type_id: obj.get_int("product_type_id"),
            business_criticality: obj.get_string("business_criticality"),
            platform: obj.get_string("platform"),
            lifecycle: obj.get_string("lifecycle"),
            origin: obj.get_string("origin"),
            revenue: obj.get_string("revenue"),
            enable_full_risk_acceptance: obj.get_bool("enable_full_risk_acceptance"),
            enable_simple_risk_acceptance: obj.get_bool("enable_simple_risk_acceptance"),
            external_audience: obj.get_bool("external_audience"),
            internet_accessible: obj.get_bool("internet_accessible"),
            prod_numeric_grade: obj.get_int("prod_numeric_grade"),
            product_manager_id: obj.get_int("product_manager_id"),
            team_manager_id: obj.get_int("team_manager_id"),
            technical_contact_id: obj.get_int("technical_contact_id"),
            user_records: obj.get_int("user_records"),
            tags: obj.get_string_set("tags"),
            regulation_ids: obj.get_int_set("regulation_ids"),
        }
    }

    pub fn to_object(&self) -> State {
        let mut obj = State::new();
        obj.set_string("id", &self.id);
        obj.set_string("name", &self.name);
        obj.set_string("description", &self.description);
        obj.set_int("product_type_id", &self.product_type_id);
        obj.set_string("business_criticality", &self.business_criticality);
        obj.set_string("platform", &self.platform);
        obj.set_string("lifecycle", &self.lifecycle);
        obj.set_string("origin", &self.origin);
        obj.set_string("revenue", &self.revenue);
        obj.set_bool("enable_full_risk_acceptance", &self.enable_full_risk_acceptance);
        obj.set_bool("enable_simple_risk_acceptance", &self.enable_simple_risk_acceptance);
        obj.set_bool("external_audience", &self.external_audience);
        obj.set_bool("internet_accessible", &self.internet_accessible);
        obj.set_int("prod_numeric_grade", &self.prod_numeric_grade);
        obj.set_int("product_manager_id", &self.product_manager_id);
        obj.set_int("team_manager_id", &self.team_manager_id);
        obj.set_int("technical_contact_id", &self.technical_contact_id);
        obj.set_int("user_records", &self.user_records);
        obj.set_string_set("tags", &self.tags);
        obj.set_int_set("regulation_ids", &self.regulation_ids);
        obj
    }
}

pub(crate) fn pairings() -> PairingSet<ProductModel, Product> {
    vec![
        pair::string_id(
            "id",
            |m: &ProductModel| &m.id,
            |m| &mut m.id,
            |p: &Product| &p.id,
            |p| &mut p.id,
        ),
        pair::string(
            "name",
            |m: &ProductModel| &m.name,
            |m| &mut m.name,
            |p: &Product| &p.name,
            |p| &mut p.name,
        ),
        pair::string(
            "description",
            |m: &ProductModel| &m.description,
            |m| &mut m.description,
            |p: &Product| &p.description,
            |p| &mut p.description,
        ),
        pair::int(
            "product_type_id",
            |m: &ProductModel| &m.product_type_id,
            |m| &mut m.product_type_id,
            |p: &Product| &p.prod_type,
            |p| &mut p.prod_type,
        ),
        pair::opt_string(
            "business_criticality",
            |m: &ProductModel| &m.business_criticality,
            |m| &mut m.business_criticality,
            |p: &Product| &p.business_criticality,
            |p| &mut p.business_criticality,
        ),
        pair::opt_string(
            "platform",
            |m: &ProductModel| &m.platform,
            |m| &mut m.platform,
            |p: &Product| &p.platform,
            |p| &mut p.platform,
        ),
        pair::opt_string(
            "lifecycle",
            |m: &ProductModel| &m.lifecycle,
            |m| &mut m.lifecycle,
            |p: &Product| &p.lifecycle,
            |p| &mut p.lifecycle,
        ),
        pair::opt_string(
            "origin",
            |m: &ProductModel| &m.origin,
            |m| &mut m.origin,
            |p: &Product| &p.origin,
            |p| &mut p.origin,
        ),
        pair::opt_string(
            "revenue",
            |m: &ProductModel| &m.revenue,
            |m| &mut m.revenue,
            |p: &Product| &p.revenue,
            |p| &mut p.revenue,
        ),
        pair::opt_bool(
            "enable_full_risk_acceptance",
            |m: &ProductModel| &m.enable_full_risk_acceptance,
            |m| &mut m.enable_full_risk_acceptance,
            |p: &Product| &p.enable_full_risk_acceptance,
            |p| &mut p.enable_full_risk_acceptance,
        ),
        pair::opt_bool(
            "enable_simple_risk_acceptance",
            |m: &ProductModel| &m.enable_simple_risk_acceptance,
            |m| &mut m.enable_simple_risk_acceptance,
            |p: &Product| &p.enable_simple_risk_acceptance,
            |p| &mut p.enable_simple_risk_acceptance,
        ),
        pair::opt_bool(
            "external_audience",
            |m: &ProductModel| &m.external_audience,
            |m| &mut m.external_audience,
            |p: &Product| &p.external_audience,
            |p| &mut p.external_audience,
        ),
        pair::opt_bool(
            "internet_accessible",
            |m: &ProductModel| &m.internet_accessible,
            |m| &mut m.internet_accessible,
            |p: &Product| &p.internet_accessible,
            |p| &mut p.internet_accessible,
        ),
        pair::opt_int(
            "prod_numeric_grade",
            |m: &ProductModel| &m.prod_numeric_grade,
            |m| &mut m.prod_numeric_grade,
            |p: &Product| &p.prod_numeric_grade,
            |p| &mut p.prod_numeric_grade,
        ),
        pair::opt_int(
            "product_manager_id",
            |m: &ProductModel| &m.product_manager_id,
            |m| &mut m.product_manager_id,
            |p: &Product| &p.product_manager,
            |p| &mut p.product_manager,
        ),
        pair::opt_int(
            "team_manager_id",
            |m: &ProductModel| &m.team_manager_id,
            |m| &mut m.team_manager_id,
            |p: &Product| &p.team_manager,
            |p| &mut p.team_manager,
        ),
        pair::opt_int(
            "technical_contact_id",
            |m: &ProductModel| &m.technical_contact_id,
            |m| &mut m.technical_contact_id,
            |p: &Product| &p.technical_contact,
            |p| &mut p.technical_contact,
        ),
        pair::opt_int(
            "user_records",
            |m: &ProductModel| &m.user_records,
            |m| &mut m.user_records,
            |p: &Product| &p.user_records,
            |p| &mut p.user_records,
        ),
        pair::string_set(
            "tags",
            |m: &ProductModel| &m.tags,
            |m| &mut m.tags,
            |p: &Product| &p.tags,
            |p| &mut p.tags,
        ),
        pair::int_set(
            "regulation_ids",
            |m: &ProductModel| &m.regulation_ids,
            |m| &mut m.regulation_ids,
            |p: &Product| &p.regulations,
            |p| &mut p.regulations,
        ),
    ]
}

pub(crate) struct ProductRemote {
    api: ProductsEndpoint,
}

#[async_trait]
impl RemoteResource for ProductRemote {
    type Local = ProductModel;
    type Remote = Product;

    fn type_label(&self) -> &'static str {
        "product"
    }

    fn pairings(&self) -> PairingSet<ProductModel, Product> {
        pairings()
    }

    fn id_of(&self, local: &ProductModel) -> Value<String> {
        local.id.clone()
    }

    async fn api_create(&self, body: &Product) -> Result<ApiResponse<Product>, ApiError> {
        self.api.create(body).await
    }

    async fn api_retrieve(&self, id: i64) -> Result<ApiResponse<Product>, ApiError> {
        self.api.retrieve(id).await
    }

    async fn api_update(&self, id: i64, body: &Product) -> Result<ApiResponse<Product>, ApiError> {
        self.api.update(id, body).await
    }

    async fn api_destroy(&self, id: i64) -> Result<ApiResponse<()>, ApiError> {
        self.api.destroy(id).await
    }
}

pub struct ProductResource {
    lifecycle: ResourceLifecycle<ProductRemote>,
}

impl ProductResource {
    pub fn new(client: Client) -> Self {
        Self {
            lifecycle: ResourceLifecycle::new(ProductRemote {
                api: ProductsEndpoint::new(client),
            }),
        }
    }

    pub fn schema_static() -> ResourceSchema {
        SchemaBuilder::new()
            .attribute(
                "id",
                AttributeBuilder::string("id")
                    .computed()
                    .description("The identifier of the product."),
            )
            .attribute(
                "name",
                AttributeBuilder::string("name")
                    .required()
                    .description("The name of the product."),
            )
            .attribute(
                "description",
                AttributeBuilder::string("description")
                    .required()
                    .description("A description of the product."),
            )
            .attribute(
                "product_type_id",
                AttributeBuilder::number("product_type_id")
                    .required()
                    .description("The identifier of the product type this product belongs to."),
            )
            .attribute(
                "business_criticality",
                AttributeBuilder::string("business_criticality")
                    .optional()
                    .description("How critical the product is to the business."),
            )
            .attribute(
                "platform",
                AttributeBuilder::string("platform")
                    .optional()
                    .description("The platform the product runs on."),
            )
            .attribute(
                "lifecycle",
                AttributeBuilder::string("lifecycle")
                    .optional()
                    .description("The lifecycle stage of the product."),
            )
            .attribute(
                "origin",
                AttributeBuilder::string("origin")
                    .optional()
                    .description("Where the product originated."),
            )
            .attribute(
                "revenue",
                AttributeBuilder::string("revenue")
                    .optional()
                    .description("The estimated revenue attributed to the product."),
            )
            .attribute(
                "enable_full_risk_acceptance",
                AttributeBuilder::bool("enable_full_risk_acceptance")
                    .optional()
                    .computed()
                    .description("Whether full risk acceptance is allowed for findings."),
            )
            .attribute(
                "enable_simple_risk_acceptance",
                AttributeBuilder::bool("enable_simple_risk_acceptance")
                    .optional()
                    .computed()
                    .description("Whether simple risk acceptance is allowed for findings."),
            )
            .attribute(
                "external_audience",
                AttributeBuilder::bool("external_audience")
                    .optional()
                    .computed()
                    .description("Whether the product is exposed to an external audience."),
            )
            .attribute(
                "internet_accessible",
                AttributeBuilder::bool("internet_accessible")
                    .optional()
                    .computed()
                    .description("Whether the product is accessible from the internet."),
            )
            .attribute(
                "prod_numeric_grade",
                AttributeBuilder::number("prod_numeric_grade")
                    .optional()
                    .description("The numeric grade of the product."),
            )
            .attribute(
                "product_manager_id",
                AttributeBuilder::number("product_manager_id")
                    .optional()
                    .description("The user id of the product manager."),
            )
            .attribute(
                "team_manager_id",
                AttributeBuilder::number("team_manager_id")
                    .optional()
                    .description("The user id of the team manager."),
            )
            .attribute(
                "technical_contact_id",
                AttributeBuilder::number("technical_contact_id")
                    .optional()
                    .description("The user id of the technical contact."),
            )
            .attribute(
                "user_records",
                AttributeBuilder::number("user_records")
                    .optional()
                    .description("An estimate of the number of user records the product holds."),
            )
            .attribute(
                "tags",
                AttributeBuilder::string_set("tags")
                    .optional()
                    .description("Tags attached to the product."),
            )
            .attribute(
                "regulation_ids",
                AttributeBuilder::number_set("regulation_ids")
                    .optional()
                    .description("Identifiers of regulations that apply to the product."),
            )
            .build_resource(0)
    }
}

#[async_trait]
impl Resource for ProductResource {
    fn schema(&self) -> ResourceSchema {
        Self::schema_static()
    }

    async fn create(&self, config: Config) -> (Option<State>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let plan = ProductModel::from_object(&config);
        let state = self.lifecycle.create(plan, &mut diags).await;
        (state.map(|m| m.to_object()), diags)
    }

    async fn read(&self, state: State) -> (Option<State>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let prior = ProductModel::from_object(&state);
        match self.lifecycle.read(prior, &mut diags).await {
            ReadOutcome::Current(refreshed) => (Some(refreshed.to_object()), diags),
            ReadOutcome::Gone | ReadOutcome::Failed => (None, diags),
        }
    }

    async fn update(&self, plan: State) -> (Option<State>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let plan = ProductModel::from_object(&plan);
        let state = self.lifecycle.update(plan, &mut diags).await;
        (state.map(|m| m.to_object()), diags)
    }

    async fn delete(&self, state: State) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let prior = ProductModel::from_object(&state);
        self.lifecycle.delete(prior, &mut diags).await;
        diags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Dynamic;
    use crate::mapping;
    use std::collections::BTreeSet;

    #[test]
    fn model_round_trips_through_an_object() {
        let mut obj = Config::new();
        obj.values.insert("name".to_string(), Dynamic::String("app".into()));
        obj.values.insert("description".to_string(), Dynamic::String("d".into()));
        obj.values.insert("product_type_id".to_string(), Dynamic::Number(2.0));
        obj.values.insert("internet_accessible".to_string(), Dynamic::Bool(true));
        obj.values.insert(
            "tags".to_string(),
            Dynamic::List(vec![Dynamic::String("a".into()), Dynamic::String("b".into())]),
        );
        obj.values.insert("id".to_string(), Dynamic::Unknown);

        let model = ProductModel::from_object(&obj);
        assert_eq!(model.name, Value::Known("app".to_string()));
        assert_eq!(model.product_type_id, Value::Known(2));
        assert_eq!(model.internet_accessible, Value::Known(true));
        assert_eq!(model.id, Value::Unknown);
        assert_eq!(model.platform, Value::Null);
        let tags: BTreeSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(model.tags, Value::Known(tags));

        let back = model.to_object();
        assert_eq!(back.get_string("name"), Value::Known("app".to_string()));
        assert_eq!(back.values.get("platform"), Some(&Dynamic::Null));
    }

    #[test]
    fn pairing_table_builds_the_wire_struct() {
        let model = ProductModel {
            id: Value::Known("9".into()),
            name: Value::Known("app".into()),
            description: Value::Known("d".into()),
            product_type_id: Value::Known(2),
            internet_accessible: Value::Known(true),
            ..Default::default()
        };
        let mut wire = Product::default();
        let diags = mapping::to_remote(&pairings(), &model, &mut wire);

        assert!(!diags.has_errors());
        assert_eq!(wire.id, 9);
        assert_eq!(wire.name, "app");
        assert_eq!(wire.prod_type, 2);
        assert_eq!(wire.internet_accessible, Some(true));
        // null sets still go out as empty lists
        assert_eq!(wire.tags, Some(Vec::new()));
        assert_eq!(wire.regulations, Some(Vec::new()));
    }

    #[test]
    fn response_overwrites_the_model() {
        let wire = Product {
            id: 9,
            name: "app".into(),
            description: "d".into(),
            prod_type: 2,
            platform: Some("web".into()),
            tags: Some(vec!["x".into()]),
            ..Default::default()
        };
        let mut model = ProductModel::default();
        let diags = mapping::to_local(&pairings(), &wire, &mut model);

        assert!(!diags.has_errors());
        assert_eq!(model.id, Value::Known("9".to_string()));
        assert_eq!(model.platform, Value::Known("web".to_string()));
        assert_eq!(model.business_criticality, Value::Null);
        let tags: BTreeSet<String> = ["x"].iter().map(|s| s.to_string()).collect();
        assert_eq!(model.tags, Value::Known(tags));
    }
}
