//! Shared create/read/update/delete orchestration.
//!
//! Every managed resource funnels through [`ResourceLifecycle`]: build the
//! outbound struct from the pairing table, call the endpoint, interpret the
//! status code, and overwrite the local model from the response body. The
//! resource types themselves only supply the pairing table and the endpoint
//! calls.

use async_trait::async_trait;

use crate::api::{ApiError, ApiResponse};
use crate::framework::Diagnostics;
use crate::mapping::{self, PairingSet};

/// One API-backed resource type: its pairing table plus the four endpoint
/// calls the lifecycle needs.
#[async_trait]
pub trait RemoteResource: Send + Sync {
    type Local: Send + Sync;
    type Remote: Default + Send + Sync;

    /// Human-readable label used in diagnostics, e.g. "product".
    fn type_label(&self) -> &'static str;

    fn pairings(&self) -> PairingSet<Self::Local, Self::Remote>;

    /// The local identifier attribute. Null or unknown means the record has
    /// never been created.
    fn id_of(&self, local: &Self::Local) -> crate::framework::Value<String>;

    async fn api_create(&self, body: &Self::Remote) -> Result<ApiResponse<Self::Remote>, ApiError>;
    async fn api_retrieve(&self, id: i64) -> Result<ApiResponse<Self::Remote>, ApiError>;
    async fn api_update(
        &self,
        id: i64,
        body: &Self::Remote,
    ) -> Result<ApiResponse<Self::Remote>, ApiError>;
    async fn api_destroy(&self, id: i64) -> Result<ApiResponse<()>, ApiError>;
}

/// Result of a refresh against the API.
pub enum ReadOutcome<L> {
    /// The record exists; the refreshed local model.
    Current(L),
    /// The API returned 404: the record is gone and should leave state.
    Gone,
    /// The call failed; diagnostics carry the details.
    Failed,
}

pub struct ResourceLifecycle<R: RemoteResource> {
    remote: R,
}

impl<R: RemoteResource> ResourceLifecycle<R> {
    pub fn new(remote: R) -> Self {
        Self { remote }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// POST the planned model. On 201 the plan is overwritten with the
    /// response body so server-assigned fields land in state.
    pub async fn create(&self, mut local: R::Local, diags: &mut Diagnostics) -> Option<R::Local> {
        let pairings = self.remote.pairings();
        let mut body = R::Remote::default();
        diags.extend(mapping::to_remote(&pairings, &local, &mut body));
        if diags.has_errors() {
            return None;
        }

        let response = match self.remote.api_create(&body).await {
            Ok(response) => response,
            Err(e) => {
                diags.add_error("Error Creating Resource", e.to_string());
                return None;
            }
        };

        if response.status != 201 {
            diags.add_error(
                "API Error Creating Resource",
                unexpected_status(response.status, &response.body),
            );
            return None;
        }

        match response.data {
            Some(data) => {
                diags.extend(mapping::to_local(&pairings, &data, &mut local));
                tracing::trace!(resource = self.remote.type_label(), "created");
                Some(local)
            }
            None => {
                diags.add_error(
                    "API Error Creating Resource",
                    "The API returned 201 without a response body.",
                );
                None
            }
        }
    }

    /// GET the record behind the stored id and refresh the model from it.
    pub async fn read(&self, mut local: R::Local, diags: &mut Diagnostics) -> ReadOutcome<R::Local> {
        let id = match self.parse_id(&local, diags) {
            Some(id) => id,
            None => return ReadOutcome::Failed,
        };

        let response = match self.remote.api_retrieve(id).await {
            Ok(response) => response,
            Err(e) => {
                diags.add_error("Error Retrieving Resource", e.to_string());
                return ReadOutcome::Failed;
            }
        };

        match response.status {
            200 => match response.data {
                Some(data) => {
                    diags.extend(mapping::to_local(&self.remote.pairings(), &data, &mut local));
                    tracing::trace!(resource = self.remote.type_label(), id, "refreshed");
                    ReadOutcome::Current(local)
                }
                None => {
                    diags.add_error(
                        "API Error Retrieving Resource",
                        "The API returned 200 without a response body.",
                    );
                    ReadOutcome::Failed
                }
            },
            404 => {
                tracing::trace!(resource = self.remote.type_label(), id, "gone upstream");
                ReadOutcome::Gone
            }
            status => {
                diags.add_error(
                    "API Error Retrieving Resource",
                    unexpected_status(status, &response.body),
                );
                ReadOutcome::Failed
            }
        }
    }

    /// PUT the planned model against the stored id. On 200 the plan is
    /// overwritten with the response body.
    pub async fn update(&self, mut local: R::Local, diags: &mut Diagnostics) -> Option<R::Local> {
        let id = self.parse_id(&local, diags)?;

        let pairings = self.remote.pairings();
        let mut body = R::Remote::default();
        diags.extend(mapping::to_remote(&pairings, &local, &mut body));
        if diags.has_errors() {
            return None;
        }

        let response = match self.remote.api_update(id, &body).await {
            Ok(response) => response,
            Err(e) => {
                diags.add_error("Error Updating Resource", e.to_string());
                return None;
            }
        };

        if response.status != 200 {
            diags.add_error(
                "API Error Updating Resource",
                unexpected_status(response.status, &response.body),
            );
            return None;
        }

        match response.data {
            Some(data) => {
                diags.extend(mapping::to_local(&pairings, &data, &mut local));
                tracing::trace!(resource = self.remote.type_label(), id, "updated");
                Some(local)
            }
            None => {
                diags.add_error(
                    "API Error Updating Resource",
                    "The API returned 200 without a response body.",
                );
                None
            }
        }
    }

    /// DELETE the record behind the stored id. Returns true when the API
    /// confirmed removal with 204.
    pub async fn delete(&self, local: R::Local, diags: &mut Diagnostics) -> bool {
        let id = match self.parse_id(&local, diags) {
            Some(id) => id,
            None => return false,
        };

        let response = match self.remote.api_destroy(id).await {
            Ok(response) => response,
            Err(e) => {
                diags.add_error("Error Deleting Resource", e.to_string());
                return false;
            }
        };

        if response.status != 204 {
            diags.add_error(
                "API Error Deleting Resource",
                unexpected_status(response.status, &response.body),
            );
            return false;
        }

        tracing::trace!(resource = self.remote.type_label(), id, "deleted");
        true
    }

    fn parse_id(&self, local: &R::Local, diags: &mut Diagnostics) -> Option<i64> {
        let id = self.remote.id_of(local);
        let raw = match id.as_known() {
            Some(raw) => raw.clone(),
            None => {
                diags.add_error(
                    "Could not Retrieve Resource",
                    "The id field was null but it is required to retrieve the resource.",
                );
                return None;
            }
        };
        match raw.parse::<i64>() {
            Ok(id) => Some(id),
            Err(e) => {
                diags.add_error(
                    "Error converting value",
                    format!("Could not convert the id value {:?} to an integer: {}", raw, e),
                );
                None
            }
        }
    }
}

pub(crate) fn unexpected_status(status: u16, body: &str) -> String {
    format!("Unexpected response code from API: {}\n\nbody:\n\n{}", status, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Value;
    use crate::mapping::pair;
    use std::sync::Mutex;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct WidgetModel {
        id: Value<String>,
        name: Value<String>,
    }

    #[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq)]
    struct Widget {
        id: i64,
        name: String,
    }

    /// Scripted endpoint: pops pre-canned responses instead of touching the
    /// network.
    #[derive(Default)]
    struct ScriptedWidgets {
        responses: Mutex<Vec<Result<(u16, String), ApiError>>>,
    }

    impl ScriptedWidgets {
        fn push(&self, status: u16, body: &str) {
            self.responses.lock().unwrap().push(Ok((status, body.to_string())));
        }

        fn push_failure(&self) {
            self.responses
                .lock()
                .unwrap()
                .push(Err(ApiError::Parse("connection reset".to_string())));
        }

        fn pop<T: serde::de::DeserializeOwned>(&self) -> Result<ApiResponse<T>, ApiError> {
            let scripted = self.responses.lock().unwrap().remove(0);
            let (status, body) = scripted?;
            ApiResponse::from_body(status, body)
        }
    }

    #[async_trait]
    impl RemoteResource for ScriptedWidgets {
        type Local = WidgetModel;
        type Remote = Widget;

        fn type_label(&self) -> &'static str {
            "widget"
        }

        fn pairings(&self) -> PairingSet<WidgetModel, Widget> {
            vec![
                pair::string_id(
                    "id",
                    |m: &WidgetModel| &m.id,
                    |m| &mut m.id,
                    |w: &Widget| &w.id,
                    |w| &mut w.id,
                ),
                pair::string(
                    "name",
                    |m: &WidgetModel| &m.name,
                    |m| &mut m.name,
                    |w: &Widget| &w.name,
                    |w| &mut w.name,
                ),
            ]
        }

        fn id_of(&self, local: &WidgetModel) -> Value<String> {
            local.id.clone()
        }

        async fn api_create(&self, _body: &Widget) -> Result<ApiResponse<Widget>, ApiError> {
            self.pop()
        }

        async fn api_retrieve(&self, _id: i64) -> Result<ApiResponse<Widget>, ApiError> {
            self.pop()
        }

        async fn api_update(&self, _id: i64, _body: &Widget) -> Result<ApiResponse<Widget>, ApiError> {
            self.pop()
        }

        async fn api_destroy(&self, _id: i64) -> Result<ApiResponse<()>, ApiError> {
            self.pop()
        }
    }

    fn lifecycle() -> ResourceLifecycle<ScriptedWidgets> {
        ResourceLifecycle::new(ScriptedWidgets::default())
    }

    #[tokio::test]
    async fn create_overwrites_plan_from_201_body() {
        let lifecycle = lifecycle();
        lifecycle.remote().push(201, r#"{"id": 42, "name": "made"}"#);

        let plan = WidgetModel {
            id: Value::Unknown,
            name: Value::Known("made".into()),
        };
        let mut diags = Diagnostics::new();
        let state = lifecycle.create(plan, &mut diags).await;

        assert!(!diags.has_errors());
        let state = state.unwrap();
        assert_eq!(state.id, Value::Known("42".to_string()));
        assert_eq!(state.name, Value::Known("made".to_string()));
    }

    #[tokio::test]
    async fn create_rejects_non_201_with_body_in_detail() {
        let lifecycle = lifecycle();
        lifecycle.remote().push(400, r#"{"name": ["This field is required."]}"#);

        let mut diags = Diagnostics::new();
        let state = lifecycle.create(WidgetModel::default(), &mut diags).await;

        assert!(state.is_none());
        assert_eq!(diags.errors.len(), 1);
        assert_eq!(diags.errors[0].summary, "API Error Creating Resource");
        assert!(diags.errors[0].detail.contains("Unexpected response code from API: 400"));
        assert!(diags.errors[0].detail.contains("This field is required."));
    }

    #[tokio::test]
    async fn create_stops_before_the_call_on_conversion_error() {
        let lifecycle = lifecycle();
        // no scripted response: reaching the endpoint would panic

        let plan = WidgetModel {
            id: Value::Known("not-a-number".into()),
            name: Value::Known("n".into()),
        };
        let mut diags = Diagnostics::new();
        let state = lifecycle.create(plan, &mut diags).await;

        assert!(state.is_none());
        assert_eq!(diags.errors[0].summary, "Error converting value");
    }

    #[tokio::test]
    async fn create_surfaces_transport_errors() {
        let lifecycle = lifecycle();
        lifecycle.remote().push_failure();

        let mut diags = Diagnostics::new();
        let state = lifecycle.create(WidgetModel::default(), &mut diags).await;

        assert!(state.is_none());
        assert_eq!(diags.errors[0].summary, "Error Creating Resource");
    }

    #[tokio::test]
    async fn read_refreshes_from_200() {
        let lifecycle = lifecycle();
        lifecycle.remote().push(200, r#"{"id": 7, "name": "renamed upstream"}"#);

        let prior = WidgetModel {
            id: Value::Known("7".into()),
            name: Value::Known("stale".into()),
        };
        let mut diags = Diagnostics::new();
        match lifecycle.read(prior, &mut diags).await {
            ReadOutcome::Current(state) => {
                assert_eq!(state.name, Value::Known("renamed upstream".to_string()));
            }
            _ => panic!("expected a refreshed state"),
        }
        assert!(!diags.has_errors());
    }

    #[tokio::test]
    async fn read_maps_404_to_gone_without_diagnostics() {
        let lifecycle = lifecycle();
        lifecycle.remote().push(404, r#"{"detail": "Not found."}"#);

        let prior = WidgetModel {
            id: Value::Known("7".into()),
            name: Value::Null,
        };
        let mut diags = Diagnostics::new();
        assert!(matches!(lifecycle.read(prior, &mut diags).await, ReadOutcome::Gone));
        assert!(!diags.has_errors());
    }

    #[tokio::test]
    async fn read_requires_an_id() {
        let lifecycle = lifecycle();

        let mut diags = Diagnostics::new();
        let outcome = lifecycle.read(WidgetModel::default(), &mut diags).await;

        assert!(matches!(outcome, ReadOutcome::Failed));
        assert_eq!(diags.errors[0].summary, "Could not Retrieve Resource");
        assert!(diags.errors[0].detail.contains("The id field was null"));
    }

    #[tokio::test]
    async fn update_overwrites_plan_from_200_body() {
        let lifecycle = lifecycle();
        lifecycle.remote().push(200, r#"{"id": 7, "name": "after"}"#);

        let plan = WidgetModel {
            id: Value::Known("7".into()),
            name: Value::Known("after".into()),
        };
        let mut diags = Diagnostics::new();
        let state = lifecycle.update(plan, &mut diags).await;

        assert!(!diags.has_errors());
        assert_eq!(state.unwrap().name, Value::Known("after".to_string()));
    }

    #[tokio::test]
    async fn update_rejects_non_200() {
        let lifecycle = lifecycle();
        lifecycle.remote().push(500, "internal error");

        let plan = WidgetModel {
            id: Value::Known("7".into()),
            name: Value::Known("after".into()),
        };
        let mut diags = Diagnostics::new();
        assert!(lifecycle.update(plan, &mut diags).await.is_none());
        assert_eq!(diags.errors[0].summary, "API Error Updating Resource");
    }

    #[tokio::test]
    async fn delete_accepts_204() {
        let lifecycle = lifecycle();
        lifecycle.remote().push(204, "");

        let state = WidgetModel {
            id: Value::Known("7".into()),
            name: Value::Null,
        };
        let mut diags = Diagnostics::new();
        assert!(lifecycle.delete(state, &mut diags).await);
        assert!(!diags.has_errors());
    }

    #[tokio::test]
    async fn delete_keeps_state_on_failure() {
        let lifecycle = lifecycle();
        lifecycle.remote().push(409, r#"{"detail": "still referenced"}"#);

        let state = WidgetModel {
            id: Value::Known("7".into()),
            name: Value::Null,
        };
        let mut diags = Diagnostics::new();
        assert!(!lifecycle.delete(state, &mut diags).await);
        assert_eq!(diags.errors[0].summary, "API Error Deleting Resource");
        assert!(diags.errors[0].detail.contains("still referenced"));
    }
}
