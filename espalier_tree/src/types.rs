// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the tree: node identifiers and category tags.

use alloc::string::String;
use core::fmt;

/// Persistent identifier for a node.
///
/// Ids are assigned by the store when a record is first saved and never change
/// afterwards. They are unique within a tree.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub i64);

impl NodeId {
    /// The raw id as stored in persistence records.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category tag of a node.
///
/// The tag set drives two things and nothing else: the fill color a renderer
/// should use, and category filtering. Tags outside the known set are
/// preserved verbatim in [`Category::Other`] so they round-trip through
/// persistence; the styling layer maps them to a default fill.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Category {
    /// The single tree root.
    Root,
    /// An interior node.
    Branch,
    /// A terminal node.
    Leaf,
    /// A terminal node of the second kind.
    Fruit,
    /// Any tag outside the known set, kept as-is.
    Other(String),
}

impl Category {
    /// Parse a stored tag. Unknown tags become [`Category::Other`].
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "root" => Self::Root,
            "branch" => Self::Branch,
            "leaf" => Self::Leaf,
            "fruit" => Self::Fruit,
            other => Self::Other(String::from(other)),
        }
    }

    /// The stored string form of this tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Root => "root",
            Self::Branch => "branch",
            Self::Leaf => "leaf",
            Self::Fruit => "fruit",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_round_trips() {
        for tag in ["root", "branch", "leaf", "fruit", "scaffold"] {
            assert_eq!(Category::parse(tag).as_str(), tag);
        }
    }

    #[test]
    fn unknown_tags_are_other() {
        assert_eq!(
            Category::parse("scaffold"),
            Category::Other(String::from("scaffold"))
        );
        assert_ne!(Category::parse("scaffold"), Category::parse("trellis"));
    }
}
