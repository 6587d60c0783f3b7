// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flat persistence shape of one node.

use espalier_tree::{Category, Node, NodeId};
use serde::{Deserialize, Serialize};

/// One node as stored and sent over the wire.
///
/// This is the normalized union of the field sets the REST backends expose:
/// the core fields the tree is built from, plus the legacy form fields
/// (`name`, `size`, `color`, `type`) that older clients still send and which
/// are carried through untouched.
///
/// `id` is absent on a record that has not been persisted yet; `save`
/// assigns one and echoes it back. `parentId` is absent only on the root.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SquareRecord {
    /// Persistent id, assigned by the store at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Display label.
    pub title: String,
    /// Category tag in string form.
    pub category: String,
    /// Render emphasis flag; defaults to included.
    #[serde(default = "default_included")]
    pub included: bool,
    /// Stored depth; validated against tree position on assembly.
    #[serde(default)]
    pub depth: u32,
    /// Owning node's id, absent for the root.
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// Legacy form field, carried verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Legacy form field, carried verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Legacy form field, carried verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Legacy form field, carried verbatim.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

fn default_included() -> bool {
    true
}

impl SquareRecord {
    /// Shorthand constructor for seeding stores in examples and tests.
    #[must_use]
    pub fn seed(id: i64, title: &str, category: &str, parent: Option<i64>, depth: u32) -> Self {
        Self {
            id: Some(id),
            title: title.to_owned(),
            category: category.to_owned(),
            included: true,
            depth,
            parent_id: parent,
            name: None,
            size: None,
            color: None,
            kind: None,
        }
    }

    /// The record for a single node (not its children), given the parent the
    /// tree places it under.
    #[must_use]
    pub fn from_node(node: &Node, parent: Option<NodeId>) -> Self {
        Self {
            id: Some(node.id().get()),
            title: node.title.clone(),
            category: node.category.as_str().to_owned(),
            included: node.included,
            depth: node.depth(),
            parent_id: parent.map(NodeId::get),
            name: None,
            size: None,
            color: None,
            kind: None,
        }
    }

    /// The parsed category tag.
    #[must_use]
    pub fn category(&self) -> Category {
        Category::parse(&self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_preserved() {
        let record = SquareRecord {
            kind: Some("form".to_owned()),
            ..SquareRecord::seed(7, "bud", "fruit", Some(3), 2)
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["parentId"], 3);
        assert_eq!(json["type"], "form");
        assert!(json.get("name").is_none(), "absent legacy fields stay off the wire");
    }

    #[test]
    fn included_defaults_to_true() {
        let record: SquareRecord =
            serde_json::from_str(r#"{"title": "t", "category": "leaf"}"#).unwrap();
        assert!(record.included);
        assert_eq!(record.id, None);
        assert_eq!(record.depth, 0);
    }

    #[test]
    fn round_trips_through_json() {
        let record = SquareRecord::seed(1, "all", "root", None, 0);
        let json = serde_json::to_string(&record).unwrap();
        let back: SquareRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn category_parses_with_fallback() {
        let record = SquareRecord::seed(1, "x", "scaffold", None, 0);
        assert_eq!(record.category().as_str(), "scaffold");
    }
}
