//! api::traits
//!
//! The `BoardApi` trait and its request/error types.
//!
//! # Design
//!
//! Every remote mutation the provisioner needs is a "create": method, path
//! and parameters in, JSON out. The trait therefore has a single operation,
//! [`BoardApi::create`], and entity-specific helpers in
//! [`crate::api::resources`] supply the fixed paths and parameters.
//!
//! The trait is async because implementations perform network I/O.
//!
//! # Security
//!
//! `ApiError` carries only the method and path of the failing call, never
//! the full URL, so credentials sent as query parameters cannot leak
//! through error messages.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors from board API operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a 4xx or 5xx status.
    #[error("Trello API error {status} on {method} {path}: {body}")]
    Remote {
        /// HTTP status code
        status: u16,
        method: Method,
        path: String,
        /// Response body, truncated and redacted
        body: String,
    },

    /// The request failed before any response arrived (DNS, connect, timeout).
    #[error("Network error calling Trello on {method} {path}: {message}")]
    Transport {
        method: Method,
        path: String,
        message: String,
    },

    /// A success response could not be decoded as JSON.
    #[error("invalid JSON from Trello on {method} {path}: {message}")]
    Decode {
        method: Method,
        path: String,
        message: String,
    },

    /// A create call succeeded but returned no `id`.
    #[error("Failed to create {resource} (no id returned) on {method} {path}")]
    MissingId {
        resource: Resource,
        method: Method,
        path: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to initialize HTTP client: {0}")]
    Init(String),
}

impl ApiError {
    /// HTTP status for remote errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the failure happened below HTTP.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }
}

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// Kind of entity a request creates.
///
/// Used for logging and for numbering dry-run sentinel identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Board,
    List,
    Label,
    Card,
    /// Attachment of an existing label to a card
    CardLabel,
    Checklist,
    CheckItem,
}

impl Resource {
    /// Prefix of the dry-run sentinel id for this kind.
    pub fn sentinel_prefix(&self) -> &'static str {
        match self {
            Resource::Board => "DRY_BOARD",
            Resource::List => "DRY_LIST",
            Resource::Label => "DRY_LABEL",
            Resource::Card => "DRY_CARD",
            Resource::CardLabel => "DRY_CARD_LABEL",
            Resource::Checklist => "DRY_CHECKLIST",
            Resource::CheckItem => "DRY_CHECKITEM",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Board => "board",
            Resource::List => "list",
            Resource::Label => "label",
            Resource::Card => "card",
            Resource::CardLabel => "card label",
            Resource::Checklist => "checklist",
            Resource::CheckItem => "checklist item",
        };
        f.write_str(name)
    }
}

/// A single create call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// What the call creates
    pub resource: Resource,
    pub method: Method,
    /// Path relative to the API base, always starting with `/`
    pub path: String,
    /// Query parameters (credentials are added by the client)
    pub params: Vec<(String, String)>,
    /// Optional JSON body
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Start a POST request for `resource` at `path`.
    pub fn post(resource: Resource, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };
        Self {
            resource,
            method: Method::Post,
            path,
            params: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a parameter by name.
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A remote board service.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the provisioner holds them behind
/// `&dyn BoardApi`.
///
/// # Error Handling
///
/// - `Remote`: the server rejected the call; report status and body
/// - `Transport`: nothing reached the server, or the reply was lost
/// - `Decode` / `MissingId`: the server replied with something unusable
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// Implementation name (e.g., "trello", "mock").
    fn name(&self) -> &'static str;

    /// Whether calls are simulated rather than sent.
    fn is_dry_run(&self) -> bool {
        false
    }

    /// Issue a create call and return the parsed response body.
    ///
    /// An empty response body is returned as `Value::Null`.
    async fn create(&self, request: ApiRequest) -> Result<Value, ApiError>;
}
