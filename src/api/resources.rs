//! api::resources
//!
//! Entity-specific wrappers over [`BoardApi::create`].
//!
//! Each helper fixes the path and parameter names for one Trello resource
//! and extracts the created id from the response.

use serde_json::Value;

use super::traits::{ApiError, ApiRequest, BoardApi, Method, Resource};

/// Parameters for a new board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBoard {
    pub name: String,
    pub desc: String,
    /// Let Trello add its default To Do/Doing/Done lists
    pub default_lists: bool,
    /// `private`, `org` or `public`
    pub permission_level: String,
    pub organization: Option<String>,
}

/// A created (or reused) board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRef {
    pub id: String,
    pub url: Option<String>,
}

/// Pull the `id` string out of a create response.
fn extract_id(target: &Target, body: &Value) -> Result<String, ApiError> {
    body.get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ApiError::MissingId {
            resource: target.resource,
            method: target.method,
            path: target.path.clone(),
        })
}

/// What a request was aimed at, kept for error reporting after the request
/// itself has been handed to the API.
struct Target {
    resource: Resource,
    method: Method,
    path: String,
}

impl From<&ApiRequest> for Target {
    fn from(request: &ApiRequest) -> Self {
        Self {
            resource: request.resource,
            method: request.method,
            path: request.path.clone(),
        }
    }
}

/// Send `request` and return the created id.
async fn create_with_id(api: &dyn BoardApi, request: ApiRequest) -> Result<String, ApiError> {
    let target = Target::from(&request);
    let body = api.create(request).await?;
    extract_id(&target, &body)
}

/// `POST /boards/`
pub async fn create_board(api: &dyn BoardApi, board: &NewBoard) -> Result<BoardRef, ApiError> {
    let mut request = ApiRequest::post(Resource::Board, "/boards/")
        .param("name", &board.name)
        .param("desc", &board.desc)
        .param("defaultLists", board.default_lists.to_string())
        .param("prefs_permissionLevel", &board.permission_level);
    if let Some(org) = &board.organization {
        request = request.param("idOrganization", org);
    }

    let target = Target::from(&request);
    let body = api.create(request).await?;
    let id = extract_id(&target, &body)?;
    let url = body.get("url").and_then(Value::as_str).map(str::to_string);

    Ok(BoardRef { id, url })
}

/// `POST /boards/{board_id}/lists`
pub async fn create_list(
    api: &dyn BoardApi,
    board_id: &str,
    name: &str,
    pos: &str,
) -> Result<String, ApiError> {
    let request = ApiRequest::post(Resource::List, format!("/boards/{}/lists", board_id))
        .param("name", name)
        .param("pos", pos);
    create_with_id(api, request).await
}

/// `POST /boards/{board_id}/labels`
///
/// A `None` color creates a colorless label.
pub async fn create_label(
    api: &dyn BoardApi,
    board_id: &str,
    name: &str,
    color: Option<&str>,
) -> Result<String, ApiError> {
    let request = ApiRequest::post(Resource::Label, format!("/boards/{}/labels", board_id))
        .param("name", name)
        .param("color", color.unwrap_or("null"));
    create_with_id(api, request).await
}

/// `POST /cards`
pub async fn create_card(
    api: &dyn BoardApi,
    list_id: &str,
    name: &str,
    desc: &str,
) -> Result<String, ApiError> {
    let request = ApiRequest::post(Resource::Card, "/cards")
        .param("idList", list_id)
        .param("name", name)
        .param("desc", desc);
    create_with_id(api, request).await
}

/// `POST /cards/{card_id}/idLabels`
///
/// Trello answers with the card's label id array, which is ignored.
pub async fn attach_label(
    api: &dyn BoardApi,
    card_id: &str,
    label_id: &str,
) -> Result<(), ApiError> {
    let request = ApiRequest::post(Resource::CardLabel, format!("/cards/{}/idLabels", card_id))
        .param("value", label_id);
    api.create(request).await?;
    Ok(())
}

/// `POST /checklists`
pub async fn create_checklist(
    api: &dyn BoardApi,
    card_id: &str,
    name: &str,
) -> Result<String, ApiError> {
    let request = ApiRequest::post(Resource::Checklist, "/checklists")
        .param("idCard", card_id)
        .param("name", name);
    create_with_id(api, request).await
}

/// `POST /checklists/{checklist_id}/checkItems`, appended at the bottom.
pub async fn add_check_item(
    api: &dyn BoardApi,
    checklist_id: &str,
    name: &str,
) -> Result<(), ApiError> {
    let request = ApiRequest::post(
        Resource::CheckItem,
        format!("/checklists/{}/checkItems", checklist_id),
    )
    .param("name", name)
    .param("pos", "bottom");
    api.create(request).await?;
    Ok(())
}
