// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Espalier Tree: an owned hierarchy of categorized squares.
//!
//! This crate is the data model shared by the layout and persistence layers.
//!
//! - Represents a tree of [`Node`]s, each carrying a persistent id, a display
//!   title, a [`Category`] tag, an inclusion flag, and an ordered list of
//!   owned children.
//! - Maintains the depth invariant: the root sits at depth 0 and every child
//!   sits exactly one level below its parent, after every mutation.
//! - Provides [`filter`], a pure category filter that keeps matching nodes
//!   and the ancestor chain above them, without touching the input tree.
//!
//! Children are owned top-down, so the structure is acyclic by construction.
//! There is no parent back-reference on a node; the persistence layer keeps
//! `parentId` in its flat records and reconstructs the tree from them.
//!
//! ## Example
//!
//! ```rust
//! use espalier_tree::{Category, Node, NodeId, filter};
//!
//! let tree = Node::new(NodeId(1), "all", Category::Root)
//!     .with_child(
//!         Node::new(NodeId(2), "trunk", Category::Branch)
//!             .with_child(Node::new(NodeId(3), "bud", Category::Fruit)),
//!     );
//!
//! // Depths were renumbered as children were attached.
//! assert_eq!(tree.depth(), 0);
//! assert_eq!(tree.children()[0].children()[0].depth(), 2);
//!
//! // Filtering keeps the fruit and its scaffolding, and leaves `tree` alone.
//! let scoped = filter(&tree, &Category::Fruit).unwrap();
//! assert_eq!(scoped.count(), 3);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod filter;
mod node;
mod types;

pub use filter::filter;
pub use node::{Node, Nodes, TreeError};
pub use types::{Category, NodeId};
