//! board::validate
//!
//! Structural and referential validation of a raw board spec.
//!
//! # Order
//!
//! Checks run in a fixed order and stop at the first violation:
//!
//! 1. `board` is an object with a non-empty `name`
//! 2. `lists` is a non-empty array of objects with unique non-empty names
//! 3. `labels`, if present, is an array of objects with `name` and `color`
//! 4. `cards`, if present, is an array of objects with a non-empty `name`,
//!    a `list` naming a declared list, and `labels` naming declared labels
//!
//! Validation is pure: it either returns a typed [`BoardSpec`] or an error,
//! and nothing downstream runs until it has succeeded.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::spec::BoardSpec;
use super::SpecError;

/// Validate a raw spec and convert it to a typed [`BoardSpec`].
///
/// # Example
///
/// ```
/// use mirror_tools::board::{validate, SpecError};
/// use serde_json::json;
///
/// let spec = validate(&json!({
///     "board": { "name": "Mirror" },
///     "lists": [{ "name": "Todo" }],
///     "cards": [{ "name": "Ship", "list": "Todo" }]
/// }))
/// .unwrap();
/// assert_eq!(spec.cards[0].list, "Todo");
///
/// let err = validate(&json!({ "board": { "name": "Mirror" } })).unwrap_err();
/// assert_eq!(err, SpecError::MissingLists);
/// ```
pub fn validate(raw: &Value) -> Result<BoardSpec, SpecError> {
    let root = raw.as_object().ok_or(SpecError::MissingBoard)?;

    check_board(root)?;
    let list_names = check_lists(root)?;
    let label_names = check_labels(root)?;
    check_cards(root, &list_names, label_names.as_ref())?;

    serde_json::from_value(raw.clone()).map_err(|e| SpecError::Malformed(e.to_string()))
}

fn check_board(root: &Map<String, Value>) -> Result<(), SpecError> {
    let board = root
        .get("board")
        .and_then(Value::as_object)
        .ok_or(SpecError::MissingBoard)?;

    if !is_non_empty_str(board.get("name")) {
        return Err(SpecError::MissingBoardName);
    }

    for key in ["desc", "prefs_permissionLevel", "idOrganization", "id", "url"] {
        expect_optional_str(board, key, || format!("board.{}", key))?;
    }
    if let Some(v) = board.get("defaultLists") {
        if !(v.is_boolean() || v.is_null()) {
            return Err(SpecError::InvalidField {
                location: "board.defaultLists".into(),
                expected: "a boolean",
            });
        }
    }
    Ok(())
}

fn check_lists(root: &Map<String, Value>) -> Result<Vec<String>, SpecError> {
    let lists = root
        .get("lists")
        .and_then(Value::as_array)
        .filter(|l| !l.is_empty())
        .ok_or(SpecError::MissingLists)?;

    let mut names = Vec::with_capacity(lists.len());
    let mut seen = HashSet::new();
    for (i, list) in lists.iter().enumerate() {
        let name = list
            .as_object()
            .and_then(|l| l.get("name"))
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .ok_or(SpecError::ListName(i))?;

        if let Some(pos) = list.get("pos") {
            if !(pos.is_number() || pos.is_string() || pos.is_null()) {
                return Err(SpecError::InvalidField {
                    location: format!("lists[{}].pos", i),
                    expected: "a number or a string",
                });
            }
        }

        if !seen.insert(name) {
            return Err(SpecError::DuplicateList(name.to_string()));
        }
        names.push(name.to_string());
    }
    Ok(names)
}

/// Returns the declared label names, or `None` when `labels` is absent.
fn check_labels(root: &Map<String, Value>) -> Result<Option<HashSet<String>>, SpecError> {
    let labels = match root.get("labels") {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v.as_array().ok_or(SpecError::LabelsNotArray)?,
    };

    let mut names = HashSet::new();
    for (i, label) in labels.iter().enumerate() {
        let label = label.as_object().ok_or(SpecError::LabelFields(i))?;
        let name = label.get("name").and_then(Value::as_str);
        let color = label.get("color");
        match (name, color) {
            (Some(name), Some(color)) if color.is_string() || color.is_null() => {
                names.insert(name.to_string());
            }
            _ => return Err(SpecError::LabelFields(i)),
        }
    }
    Ok(Some(names))
}

fn check_cards(
    root: &Map<String, Value>,
    list_names: &[String],
    label_names: Option<&HashSet<String>>,
) -> Result<(), SpecError> {
    let cards = match root.get("cards") {
        None | Some(Value::Null) => return Ok(()),
        Some(v) => v.as_array().ok_or(SpecError::CardsNotArray)?,
    };

    for (i, card) in cards.iter().enumerate() {
        let card = card.as_object().ok_or(SpecError::CardName(i))?;
        if !is_non_empty_str(card.get("name")) {
            return Err(SpecError::CardName(i));
        }

        let list = card.get("list");
        let known_list = list
            .and_then(Value::as_str)
            .is_some_and(|name| list_names.iter().any(|l| l == name));
        if !known_list {
            return Err(SpecError::UnknownList {
                index: i,
                list: render(list),
            });
        }

        expect_optional_str(card, "desc", || format!("cards[{}].desc", i))?;
        check_card_labels(i, card, label_names)?;
        check_checklist(i, card)?;
    }
    Ok(())
}

fn check_card_labels(
    index: usize,
    card: &Map<String, Value>,
    label_names: Option<&HashSet<String>>,
) -> Result<(), SpecError> {
    let refs = match card.get("labels") {
        None | Some(Value::Null) => return Ok(()),
        Some(v) => v.as_array().ok_or_else(|| SpecError::InvalidField {
            location: format!("cards[{}].labels", index),
            expected: "an array of label names",
        })?,
    };

    for label in refs {
        let name = label.as_str().ok_or_else(|| SpecError::InvalidField {
            location: format!("cards[{}].labels", index),
            expected: "an array of label names",
        })?;
        if !label_names.is_some_and(|names| names.contains(name)) {
            return Err(SpecError::UnknownLabel {
                index,
                label: name.to_string(),
            });
        }
    }
    Ok(())
}

fn check_checklist(index: usize, card: &Map<String, Value>) -> Result<(), SpecError> {
    let checklist = match card.get("checklist") {
        None | Some(Value::Null) => return Ok(()),
        Some(v) => v.as_object().ok_or_else(|| SpecError::InvalidField {
            location: format!("cards[{}].checklist", index),
            expected: "an object",
        })?,
    };

    expect_optional_str(checklist, "name", || {
        format!("cards[{}].checklist.name", index)
    })?;

    match checklist.get("items") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(items)) if items.iter().all(Value::is_string) => Ok(()),
        Some(_) => Err(SpecError::InvalidField {
            location: format!("cards[{}].checklist.items", index),
            expected: "an array of strings",
        }),
    }
}

fn is_non_empty_str(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}

/// Fail unless `key` is absent, null or a string.
fn expect_optional_str(
    object: &Map<String, Value>,
    key: &str,
    location: impl FnOnce() -> String,
) -> Result<(), SpecError> {
    match object.get(key) {
        None | Some(Value::Null) | Some(Value::String(_)) => Ok(()),
        Some(_) => Err(SpecError::InvalidField {
            location: location(),
            expected: "a string",
        }),
    }
}

/// Render a reference value for an error message.
fn render(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "board": { "name": "Mirror" },
            "lists": [{ "name": "Todo" }, { "name": "Done" }],
            "labels": [{ "name": "bug", "color": "red" }],
            "cards": [
                { "name": "A", "list": "Todo", "labels": ["bug"] },
                { "name": "B", "list": "Done", "checklist": { "items": ["x", "y"] } }
            ]
        })
    }

    #[test]
    fn accepts_valid_spec() {
        let spec = validate(&minimal()).unwrap();
        assert_eq!(spec.board.name, "Mirror");
        assert_eq!(spec.lists.len(), 2);
        assert_eq!(spec.labels.len(), 1);
        assert_eq!(spec.cards.len(), 2);
        assert_eq!(spec.checklist_item_count(), 2);
    }

    #[test]
    fn null_default_lists_means_false() {
        let raw = json!({
            "board": { "name": "X", "defaultLists": null },
            "lists": [{ "name": "Todo" }]
        });
        let spec = validate(&raw).unwrap();
        assert!(!spec.board.default_lists);

        let raw = json!({
            "board": { "name": "X", "defaultLists": true },
            "lists": [{ "name": "Todo" }]
        });
        assert!(validate(&raw).unwrap().board.default_lists);
    }

    #[test]
    fn rejects_non_object_root() {
        assert_eq!(validate(&json!([])), Err(SpecError::MissingBoard));
    }

    #[test]
    fn rejects_missing_board() {
        let mut raw = minimal();
        raw.as_object_mut().unwrap().remove("board");
        assert_eq!(validate(&raw), Err(SpecError::MissingBoard));
    }

    #[test]
    fn rejects_board_that_is_not_an_object() {
        let mut raw = minimal();
        raw["board"] = json!("Mirror");
        assert_eq!(validate(&raw), Err(SpecError::MissingBoard));
    }

    #[test]
    fn rejects_missing_or_empty_board_name() {
        let mut raw = minimal();
        raw["board"] = json!({});
        assert_eq!(validate(&raw), Err(SpecError::MissingBoardName));

        raw["board"] = json!({ "name": "" });
        assert_eq!(validate(&raw), Err(SpecError::MissingBoardName));
    }

    #[test]
    fn board_is_checked_before_lists() {
        let raw = json!({ "board": {} });
        assert_eq!(validate(&raw), Err(SpecError::MissingBoardName));
    }

    #[test]
    fn rejects_missing_or_empty_lists() {
        let mut raw = minimal();
        raw["lists"] = json!([]);
        assert_eq!(validate(&raw), Err(SpecError::MissingLists));

        raw.as_object_mut().unwrap().remove("lists");
        assert_eq!(validate(&raw), Err(SpecError::MissingLists));
    }

    #[test]
    fn rejects_unnamed_list() {
        let mut raw = minimal();
        raw["lists"] = json!([{ "name": "Todo" }, { "pos": 2 }]);
        assert_eq!(validate(&raw), Err(SpecError::ListName(1)));
    }

    #[test]
    fn rejects_duplicate_list_names() {
        let mut raw = minimal();
        raw["lists"] = json!([{ "name": "Todo" }, { "name": "Todo" }]);
        let err = validate(&raw).unwrap_err();
        assert_eq!(err, SpecError::DuplicateList("Todo".into()));
        assert!(err.to_string().contains("must be unique"));
    }

    #[test]
    fn rejects_bad_pos_type() {
        let mut raw = minimal();
        raw["lists"][0]["pos"] = json!({ "at": 1 });
        assert!(matches!(
            validate(&raw),
            Err(SpecError::InvalidField { location, .. }) if location == "lists[0].pos"
        ));
    }

    #[test]
    fn rejects_labels_that_are_not_an_array() {
        let mut raw = minimal();
        raw["labels"] = json!({ "name": "bug" });
        let err = validate(&raw).unwrap_err();
        assert_eq!(err, SpecError::LabelsNotArray);
        assert_eq!(err.to_string(), "Spec labels must be an array if provided");
    }

    #[test]
    fn rejects_label_without_color() {
        let mut raw = minimal();
        raw["labels"] = json!([{ "name": "bug", "color": "red" }, { "name": "ops" }]);
        assert_eq!(validate(&raw), Err(SpecError::LabelFields(1)));
    }

    #[test]
    fn null_color_is_allowed() {
        let mut raw = minimal();
        raw["labels"] = json!([{ "name": "bug", "color": null }]);
        let spec = validate(&raw).unwrap();
        assert_eq!(spec.labels[0].color, None);
    }

    #[test]
    fn null_sections_are_treated_as_absent() {
        let raw = json!({
            "board": { "name": "Mirror" },
            "lists": [{ "name": "Todo" }],
            "labels": null,
            "cards": null
        });
        let spec = validate(&raw).unwrap();
        assert!(spec.labels.is_empty());
        assert!(spec.cards.is_empty());
    }

    #[test]
    fn rejects_cards_that_are_not_an_array() {
        let mut raw = minimal();
        raw["cards"] = json!("A");
        let err = validate(&raw).unwrap_err();
        assert_eq!(err, SpecError::CardsNotArray);
        assert_eq!(err.to_string(), "Spec cards must be an array if provided");
    }

    #[test]
    fn rejects_unnamed_card() {
        let mut raw = minimal();
        raw["cards"][1]["name"] = json!("");
        assert_eq!(validate(&raw), Err(SpecError::CardName(1)));
    }

    #[test]
    fn rejects_unknown_list_reference() {
        let mut raw = minimal();
        raw["cards"][0]["list"] = json!("Later");
        let err = validate(&raw).unwrap_err();
        assert_eq!(
            err,
            SpecError::UnknownList {
                index: 0,
                list: "Later".into()
            }
        );
        assert_eq!(err.to_string(), "Spec cards[0] references unknown list: Later");
    }

    #[test]
    fn rejects_missing_list_reference() {
        let mut raw = minimal();
        raw["cards"][0].as_object_mut().unwrap().remove("list");
        assert_eq!(
            validate(&raw),
            Err(SpecError::UnknownList {
                index: 0,
                list: "null".into()
            })
        );
    }

    #[test]
    fn rejects_unknown_label_reference() {
        let mut raw = minimal();
        raw["cards"][0]["labels"] = json!(["bug", "feature"]);
        assert_eq!(
            validate(&raw),
            Err(SpecError::UnknownLabel {
                index: 0,
                label: "feature".into()
            })
        );
    }

    #[test]
    fn label_reference_without_declared_labels_is_unknown() {
        let mut raw = minimal();
        raw.as_object_mut().unwrap().remove("labels");
        assert!(matches!(
            validate(&raw),
            Err(SpecError::UnknownLabel { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_non_string_checklist_items() {
        let mut raw = minimal();
        raw["cards"][1]["checklist"]["items"] = json!(["ok", 3]);
        assert!(matches!(
            validate(&raw),
            Err(SpecError::InvalidField { location, .. }) if location == "cards[1].checklist.items"
        ));
    }

    #[test]
    fn rejects_checklist_that_is_not_an_object() {
        let mut raw = minimal();
        raw["cards"][1]["checklist"] = json!(["a"]);
        assert!(matches!(
            validate(&raw),
            Err(SpecError::InvalidField { location, .. }) if location == "cards[1].checklist"
        ));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut raw = minimal();
        raw["$schema"] = json!("./board.schema.json");
        raw["board"]["theme"] = json!("dark");
        assert!(validate(&raw).is_ok());
    }
}
