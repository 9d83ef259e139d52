//! board::spec
//!
//! Typed board specification.
//!
//! # Format
//!
//! ```json
//! {
//!   "board": { "name": "Mirror", "desc": "Launch plan", "prefs_permissionLevel": "org" },
//!   "lists": [ { "name": "Backlog" }, { "name": "Doing", "pos": "bottom" } ],
//!   "labels": [ { "name": "bug", "color": "red" } ],
//!   "cards": [
//!     {
//!       "name": "Write copy",
//!       "list": "Backlog",
//!       "labels": ["bug"],
//!       "checklist": { "name": "Steps", "items": ["draft", "review"] }
//!     }
//!   ]
//! }
//! ```
//!
//! Unknown keys are ignored. A spec reaches these types only through
//! [`crate::board::validate`], so the referential invariants hold for any
//! `BoardSpec` value in the program.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::SpecError;

/// Default permission level for new boards.
pub const DEFAULT_PERMISSION_LEVEL: &str = "private";

/// Default checklist name.
pub const DEFAULT_CHECKLIST_NAME: &str = "Checklist";

/// A validated board specification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardSpec {
    pub board: BoardDef,
    pub lists: Vec<ListDef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<LabelDef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cards: Vec<CardDef>,
}

impl BoardSpec {
    /// Total checklist items across all cards.
    pub fn checklist_item_count(&self) -> usize {
        self.cards
            .iter()
            .filter_map(|c| c.checklist.as_ref())
            .filter(|cl| !cl.is_empty())
            .map(|cl| cl.items.len())
            .sum()
    }
}

/// The `board` object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardDef {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub desc: String,
    #[serde(default, rename = "prefs_permissionLevel")]
    pub permission_level: Option<String>,
    #[serde(default, rename = "idOrganization")]
    pub organization: Option<String>,
    #[serde(default, rename = "defaultLists", deserialize_with = "null_as_default")]
    pub default_lists: bool,
    /// Id of an existing board to populate instead of creating one
    #[serde(default)]
    pub id: Option<String>,
    /// URL of the existing board, reported in the summary
    #[serde(default)]
    pub url: Option<String>,
}

impl BoardDef {
    /// Existing board id, if a non-empty one was given.
    pub fn existing_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Permission level, defaulting to `private`.
    pub fn permission_level(&self) -> &str {
        self.permission_level
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PERMISSION_LEVEL)
    }

    /// Organization from the spec, falling back to `default_org`.
    pub fn organization_or<'a>(&'a self, default_org: Option<&'a str>) -> Option<&'a str> {
        self.organization
            .as_deref()
            .filter(|o| !o.is_empty())
            .or(default_org)
    }
}

/// A list entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListDef {
    pub name: String,
    #[serde(default)]
    pub pos: Option<Position>,
}

impl ListDef {
    /// Position parameter: explicit `pos`, else the 1-based index.
    pub fn pos_param(&self, index: usize) -> String {
        match &self.pos {
            Some(pos) => pos.to_string(),
            None => (index + 1).to_string(),
        }
    }
}

/// A list position: a number or a keyword such as `top`/`bottom`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Position {
    Number(serde_json::Number),
    Keyword(String),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Number(n) => write!(f, "{}", n),
            Position::Keyword(k) => f.write_str(k),
        }
    }
}

/// A label entry. A `null` color makes a colorless label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelDef {
    pub name: String,
    pub color: Option<String>,
}

/// A card entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardDef {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub desc: String,
    /// Name of the list the card goes in
    pub list: String,
    /// Names of labels to attach
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    #[serde(default)]
    pub checklist: Option<ChecklistDef>,
}

/// A card's checklist.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChecklistDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<String>,
}

impl ChecklistDef {
    /// Checklist name, defaulting to "Checklist".
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_CHECKLIST_NAME)
    }

    /// An empty `{}` checklist is skipped entirely.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.items.is_empty()
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read and parse a spec file as raw JSON.
///
/// # Errors
///
/// `SpecError::Read` if the file cannot be read, `SpecError::Parse` if it
/// is not valid JSON.
pub fn load_spec(path: &Path) -> Result<Value, SpecError> {
    let contents = fs::read_to_string(path).map_err(|e| SpecError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| SpecError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
