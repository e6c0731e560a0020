//! Provider, resource and data source traits.
//!
//! The host decodes wire payloads into [`Config`]/[`State`] objects, calls
//! these methods, and encodes the returned state. A `None` state returned
//! from `read` with no error diagnostics means the resource no longer exists
//! upstream and must be removed from state; a `None` from `create`/`update`
//! always comes with error diagnostics and means nothing is persisted.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::framework::error::Result;
use crate::framework::schema::{DataSourceSchema, ResourceSchema};
use crate::framework::types::{Config, Diagnostics, State};

#[async_trait]
pub trait Provider: Send + Sync {
    /// Wire up clients from provider configuration. Called once before any
    /// resource or data source is instantiated.
    async fn configure(&mut self, config: Config) -> Diagnostics;

    fn resource_schemas(&self) -> HashMap<String, ResourceSchema>;

    fn data_source_schemas(&self) -> HashMap<String, DataSourceSchema>;

    fn create_resource(&self, name: &str) -> Result<Box<dyn Resource>>;

    fn create_data_source(&self, name: &str) -> Result<Box<dyn DataSource>>;
}

#[async_trait]
pub trait Resource: Send + Sync {
    fn schema(&self) -> ResourceSchema;

    /// Called during plan with raw configuration. The default accepts
    /// everything; resources with cross-field constraints override this.
    async fn validate(&self, _config: &Config) -> Diagnostics {
        Diagnostics::new()
    }

    async fn create(&self, config: Config) -> (Option<State>, Diagnostics);

    async fn read(&self, state: State) -> (Option<State>, Diagnostics);

    async fn update(&self, plan: State) -> (Option<State>, Diagnostics);

    /// Empty error diagnostics mean the resource was deleted and must be
    /// dropped from state; otherwise it stays so a retry is possible.
    async fn delete(&self, state: State) -> Diagnostics;
}

#[async_trait]
pub trait DataSource: Send + Sync {
    fn schema(&self) -> DataSourceSchema;

    async fn read(&self, config: Config) -> (Option<State>, Diagnostics);
}
