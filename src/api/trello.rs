//! api::trello
//!
//! Trello implementation of [`BoardApi`] over the REST API.
//!
//! # Authentication
//!
//! Trello authenticates with an API key and token sent as the `key` and
//! `token` query parameters on every call. Both live in [`Credentials`],
//! passed in at construction. Nothing in this module formats the full
//! request URL into an error or a log line; errors carry method and path
//! only, and any text taken from the server or the transport layer is run
//! through [`Credentials::redact`].
//!
//! # Dry Run
//!
//! In [`Mode::DryRun`] no request is sent. Each create returns a sentinel
//! id built from the resource kind and a per-kind counter, e.g.
//! `DRY_LIST_2` for the second list.
//!
//! # Example
//!
//! ```no_run
//! use mirror_tools::api::trello::{ClientOptions, Mode, TrelloClient};
//! use mirror_tools::api::{ApiRequest, BoardApi, Resource};
//! use mirror_tools::secrets::Credentials;
//!
//! # tokio_test::block_on(async {
//! let client = TrelloClient::new(Credentials::from_env()?, ClientOptions::default())?;
//! let board = client
//!     .create(ApiRequest::post(Resource::Board, "/boards/").param("name", "Roadmap"))
//!     .await?;
//! println!("created board {}", board["id"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```

use std::collections::HashMap;
use std::error::Error as _;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::{json, Value};

use super::traits::{ApiError, ApiRequest, BoardApi, Method, Resource};
use crate::core::config::schema::DEFAULT_API_BASE;
use crate::secrets::Credentials;

/// Maximum number of response-body characters kept in a `Remote` error.
pub const ERROR_BODY_LIMIT: usize = 500;

/// URL returned for a simulated board.
pub const DRY_RUN_BOARD_URL: &str = "https://trello.com/";

/// Whether requests are sent or simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Send requests to the API
    #[default]
    Live,
    /// Return sentinel ids without touching the network
    DryRun,
}

/// Construction options for [`TrelloClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API base URL, without a trailing slash
    pub api_base: String,
    /// Per-request timeout; `None` keeps the reqwest default
    pub timeout: Option<Duration>,
    pub mode: Mode,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: None,
            mode: Mode::Live,
        }
    }
}

/// Trello REST client.
pub struct TrelloClient {
    /// HTTP client for making requests
    client: Client,
    credentials: Credentials,
    api_base: String,
    mode: Mode,
    /// Per-kind creation counters for dry-run sentinels
    dry_run_counters: Mutex<HashMap<Resource, u64>>,
}

// Custom Debug to skip the HTTP client and dry-run counters
impl std::fmt::Debug for TrelloClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrelloClient")
            .field("credentials", &self.credentials)
            .field("api_base", &self.api_base)
            .field("mode", &self.mode)
            .finish()
    }
}

impl TrelloClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// `ApiError::Init` if the underlying HTTP client cannot be built.
    pub fn new(credentials: Credentials, options: ClientOptions) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Init(credentials.redact(&e.to_string())))?;

        Ok(Self {
            client,
            credentials,
            api_base: options.api_base.trim_end_matches('/').to_string(),
            mode: options.mode,
            dry_run_counters: Mutex::new(HashMap::new()),
        })
    }

    /// The configured API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Produce the next sentinel response for `resource`.
    fn sentinel(&self, resource: Resource) -> Value {
        let n = {
            let mut counters = self
                .dry_run_counters
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let counter = counters.entry(resource).or_insert(0);
            *counter += 1;
            *counter
        };
        let id = format!("{}_{}", resource.sentinel_prefix(), n);

        match resource {
            Resource::Board => json!({ "id": id, "url": DRY_RUN_BOARD_URL }),
            _ => json!({ "id": id }),
        }
    }

    /// Build a transport error, stripped of the URL and redacted.
    fn transport_error(&self, request: &ApiRequest, err: reqwest::Error) -> ApiError {
        let err = err.without_url();
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        ApiError::Transport {
            method: request.method,
            path: request.path.clone(),
            message: self.credentials.redact(&message),
        }
    }

    /// Send a request and decode the response.
    async fn send(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.api_base, request.path);

        let mut query: Vec<(&str, &str)> = request
            .params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        query.push(("key", self.credentials.key.expose()));
        query.push(("token", self.credentials.token.expose()));

        let mut builder = self
            .client
            .request(to_reqwest(request.method), &url)
            .query(&query)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.transport_error(request, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(request, e))?;

        if !status.is_success() {
            return Err(ApiError::Remote {
                status: status.as_u16(),
                method: request.method,
                path: request.path.clone(),
                body: truncate(&self.credentials.redact(&text), ERROR_BODY_LIMIT),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            method: request.method,
            path: request.path.clone(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl BoardApi for TrelloClient {
    fn name(&self) -> &'static str {
        "trello"
    }

    fn is_dry_run(&self) -> bool {
        self.mode == Mode::DryRun
    }

    async fn create(&self, request: ApiRequest) -> Result<Value, ApiError> {
        if self.mode == Mode::DryRun {
            let value = self.sentinel(request.resource);
            tracing::debug!(
                resource = %request.resource,
                id = %value["id"],
                "dry-run: skipped {} {}",
                request.method,
                request.path
            );
            return Ok(value);
        }

        tracing::debug!(resource = %request.resource, "{} {}", request.method, request.path);
        let result = self.send(&request).await;
        if let Err(ref e) = result {
            tracing::debug!(error = %e, "trello request failed");
        }
        result
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Keep at most `limit` characters.
fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dry_client() -> TrelloClient {
        TrelloClient::new(
            Credentials::new("key-abc", "token-xyz"),
            ClientOptions {
                mode: Mode::DryRun,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn new_trims_trailing_slash() {
        let client = TrelloClient::new(
            Credentials::new("k", "t"),
            ClientOptions {
                api_base: "http://localhost:1234/1/".into(),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(client.api_base(), "http://localhost:1234/1");
        assert_eq!(client.mode(), Mode::Live);
        assert!(!client.is_dry_run());
    }

    #[test]
    fn debug_does_not_expose_credentials() {
        let client = dry_client();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("key-abc"));
        assert!(!debug.contains("token-xyz"));
        assert!(debug.contains("TrelloClient"));
    }

    #[tokio::test]
    async fn dry_run_numbers_sentinels_per_kind() {
        let client = dry_client();

        let list1 = client
            .create(ApiRequest::post(Resource::List, "/boards/b/lists"))
            .await
            .unwrap();
        let label1 = client
            .create(ApiRequest::post(Resource::Label, "/boards/b/labels"))
            .await
            .unwrap();
        let list2 = client
            .create(ApiRequest::post(Resource::List, "/boards/b/lists"))
            .await
            .unwrap();

        assert_eq!(list1["id"], "DRY_LIST_1");
        assert_eq!(label1["id"], "DRY_LABEL_1");
        assert_eq!(list2["id"], "DRY_LIST_2");
    }

    #[tokio::test]
    async fn dry_run_board_carries_url() {
        let client = dry_client();
        let board = client
            .create(ApiRequest::post(Resource::Board, "/boards/"))
            .await
            .unwrap();
        assert_eq!(board["id"], "DRY_BOARD_1");
        assert_eq!(board["url"], DRY_RUN_BOARD_URL);
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ééé", 2), "éé");
        assert_eq!(truncate("ab", 10), "ab");
    }

    #[test]
    fn method_mapping() {
        assert_eq!(to_reqwest(Method::Post), reqwest::Method::POST);
        assert_eq!(to_reqwest(Method::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest(Method::Put), reqwest::Method::PUT);
        assert_eq!(to_reqwest(Method::Delete), reqwest::Method::DELETE);
    }
}
