//! Managed resource implementations.

pub mod jira_product_configuration;
pub mod product;
pub mod product_type;

pub use jira_product_configuration::JiraProductConfigurationResource;
pub use product::ProductResource;
pub use product_type::ProductTypeResource;
