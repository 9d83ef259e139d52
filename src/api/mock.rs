//! api::mock
//!
//! Mock board API for deterministic testing.
//!
//! # Design
//!
//! The mock records every request it receives and answers creates with
//! predictable ids (`mock-list-1`, `mock-card-2`, ...). Failures can be
//! injected per resource kind or per call number.
//!
//! # Example
//!
//! ```
//! use mirror_tools::api::mock::MockApi;
//! use mirror_tools::api::{ApiRequest, BoardApi, Resource};
//!
//! # tokio_test::block_on(async {
//! let api = MockApi::new();
//!
//! let list = api
//!     .create(ApiRequest::post(Resource::List, "/boards/b1/lists").param("name", "Todo"))
//!     .await
//!     .unwrap();
//!
//! assert_eq!(list["id"], "mock-list-1");
//! assert_eq!(api.call_count(), 1);
//! # });
//! ```

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{ApiError, ApiRequest, BoardApi, Resource};

/// Mock board API for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockApi {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockApiInner>>,
}

/// Internal mutable state.
#[derive(Debug)]
struct MockApiInner {
    /// Next id per resource kind.
    next_ids: HashMap<Resource, u64>,
    /// Failure to inject.
    fail_on: Option<FailOn>,
    /// Every request received, including failed ones.
    operations: Vec<ApiRequest>,
}

/// Configuration for which call should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail the first call that creates this kind of resource.
    Resource(Resource, ApiError),
    /// Fail the n-th call overall (1-based).
    Call(usize, ApiError),
    /// Answer calls for this kind with a body that has no `id`.
    MissingId(Resource),
}

impl MockApi {
    /// Create a new mock with no failures configured.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockApiInner {
                next_ids: HashMap::new(),
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Configure the mock to fail.
    ///
    /// # Example
    ///
    /// ```
    /// use mirror_tools::api::mock::{FailOn, MockApi};
    /// use mirror_tools::api::{ApiError, Method, Resource};
    ///
    /// let api = MockApi::new().fail_on(FailOn::Resource(
    ///     Resource::Card,
    ///     ApiError::Remote {
    ///         status: 422,
    ///         method: Method::Post,
    ///         path: "/cards".into(),
    ///         body: "invalid idList".into(),
    ///     },
    /// ));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Get all recorded requests, in call order.
    pub fn operations(&self) -> Vec<ApiRequest> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.operations.len()
    }

    /// Recorded requests for one resource kind.
    pub fn calls_for(&self, resource: Resource) -> Vec<ApiRequest> {
        let inner = self.inner.lock().unwrap();
        inner
            .operations
            .iter()
            .filter(|op| op.resource == resource)
            .cloned()
            .collect()
    }

    /// Decide whether the call just recorded should fail.
    fn check_fail(inner: &MockApiInner, resource: Resource) -> Option<Result<Value, ApiError>> {
        match &inner.fail_on {
            Some(FailOn::Resource(r, e)) if *r == resource => Some(Err(e.clone())),
            Some(FailOn::Call(n, e)) if *n == inner.operations.len() => Some(Err(e.clone())),
            Some(FailOn::MissingId(r)) if *r == resource => Some(Ok(json!({}))),
            _ => None,
        }
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_slug(resource: Resource) -> &'static str {
    match resource {
        Resource::Board => "board",
        Resource::List => "list",
        Resource::Label => "label",
        Resource::Card => "card",
        Resource::CardLabel => "card-label",
        Resource::Checklist => "checklist",
        Resource::CheckItem => "checkitem",
    }
}

#[async_trait]
impl BoardApi for MockApi {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let resource = request.resource;
        inner.operations.push(request);

        if let Some(result) = Self::check_fail(&inner, resource) {
            return result;
        }

        let counter = inner.next_ids.entry(resource).or_insert(0);
        *counter += 1;
        let id = format!("mock-{}-{}", kind_slug(resource), counter);

        Ok(match resource {
            Resource::Board => json!({ "id": id, "url": format!("https://trello.com/b/{}", id) }),
            _ => json!({ "id": id }),
        })
    }
}
