// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Espalier Layout: deterministic nested-rectangle placement for square trees.
//!
//! Given a tree from [`espalier_tree`] and a starting rectangle, [`layout`]
//! produces a lazy, finite sequence of [`Placed`] pairs: each node together
//! with its world-space [`kurbo::Rect`]. The walk is a pure function of its
//! inputs, so calling it twice yields identical rectangles, and the iterator
//! can be rebuilt at any time.
//!
//! The geometry is fixed: the root square gets the starting rectangle, and
//! each node's children sit on a single row below it, half its side each,
//! horizontally centered under it with one third of the parent side as
//! spacing.
//!
//! The [`style`] module carries the two paint hints a renderer needs beyond
//! rectangles: the fill color of a node's category and the opacity of its
//! inclusion flag. Drawing itself (and hit testing) is the renderer's job,
//! not this crate's.
//!
//! ## Example
//!
//! ```rust
//! use espalier_layout::layout;
//! use espalier_tree::{Category, Node, NodeId};
//! use kurbo::Point;
//!
//! let tree = Node::new(NodeId(1), "root", Category::Root)
//!     .with_child(Node::new(NodeId(2), "left", Category::Branch))
//!     .with_child(Node::new(NodeId(3), "right", Category::Branch));
//!
//! let placed: Vec<_> = layout(&tree, Point::new(300.0, 50.0), 100.0)
//!     .unwrap()
//!     .collect();
//! assert_eq!(placed.len(), 3);
//! assert_eq!(placed[0].rect.width(), 100.0);
//! assert_eq!(placed[1].rect.width(), 50.0); // children are half the side
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod walk;

pub mod style;

pub use walk::{Layout, LayoutError, Placed, layout};
