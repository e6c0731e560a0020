//! Host-protocol surface consumed by the provider core.
//!
//! The wire protocol itself (gRPC serving, msgpack encoding) lives in the
//! plugin host; this module only carries the decoded shapes the core works
//! with: dynamic attribute objects, tri-state attribute values, diagnostics,
//! schemas and the provider/resource/data-source traits.

pub mod error;
pub mod provider;
pub mod schema;
pub mod types;
pub mod value;

pub use error::{ProviderError, Result};
pub use provider::{DataSource, Provider, Resource};
pub use schema::{
    Attribute, AttributeBuilder, AttributeType, DataSourceSchema, ResourceSchema, SchemaBuilder,
};
pub use types::{Config, Diagnostic, Diagnostics, Dynamic, DynamicObject, Severity, State};
pub use value::Value;
