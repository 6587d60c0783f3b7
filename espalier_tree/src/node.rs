// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, mutation, traversal.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::{Category, NodeId};

/// Errors from structural tree operations.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// No node with the given id exists in this tree.
    #[error("no node with id {0}")]
    NotFound(NodeId),
    /// The root of a tree cannot be detached from itself.
    #[error("cannot detach the root node {0}")]
    DetachRoot(NodeId),
    /// A node's depth disagrees with its position in the tree.
    #[error("node {id} has depth {found}, its position implies {expected}")]
    Depth {
        /// The offending node.
        id: NodeId,
        /// Depth implied by tree position.
        expected: u32,
        /// Depth actually recorded on the node.
        found: u32,
    },
}

/// One element of the hierarchical square tree.
///
/// A node owns its children outright, so a tree can never contain a cycle.
/// `depth` and `children` are kept private: all structural mutation goes
/// through [`Node::attach_child`] and [`Node::detach`], which renumber depths
/// so that `child.depth == parent.depth + 1` holds after every operation.
///
/// `title`, `category`, and `included` carry no structural invariant and are
/// plain public fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    /// Display label, mutable.
    pub title: String,
    /// Tag driving fill color and filtering.
    pub category: Category,
    /// Render emphasis flag. An excluded node stays in the layout; a renderer
    /// is expected to draw it at reduced opacity, nothing more.
    pub included: bool,
    depth: u32,
    children: Vec<Node>,
}

impl Node {
    /// Create a detached node: depth 0, included, no children.
    pub fn new(id: NodeId, title: impl Into<String>, category: Category) -> Self {
        Self {
            id,
            title: title.into(),
            category,
            included: true,
            depth: 0,
            children: Vec::new(),
        }
    }

    /// Builder-style variant of [`Node::attach_child`] that attaches directly
    /// under `self`. Handy when constructing trees by hand.
    #[must_use]
    pub fn with_child(mut self, mut child: Self) -> Self {
        child.renumber(self.depth + 1);
        self.children.push(child);
        self
    }

    /// The persistent identifier of this node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Distance from the root: 0 for the root, `parent.depth + 1` below it.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The ordered children of this node. Order is render-significant: it
    /// determines horizontal placement in the layout.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order depth-first iteration over this subtree, children in order.
    pub fn iter(&self) -> Nodes<'_> {
        Nodes {
            stack: alloc::vec![self],
        }
    }

    /// Find the node with the given id in this subtree.
    #[must_use]
    pub fn find(&self, id: NodeId) -> Option<&Self> {
        self.iter().find(|n| n.id == id)
    }

    /// Find the node with the given id in this subtree, mutably.
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Self> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// The parent of the node with the given id, or `None` for the root of
    /// this subtree and for unknown ids. This is a search; nodes do not store
    /// a parent edge.
    #[must_use]
    pub fn parent_of(&self, id: NodeId) -> Option<&Self> {
        self.iter().find(|n| n.children.iter().any(|c| c.id == id))
    }

    /// Attach `child` (and everything below it) as the last child of the node
    /// with id `parent`. The attached subtree is renumbered to sit one level
    /// below its new parent.
    pub fn attach_child(&mut self, parent: NodeId, mut child: Self) -> Result<(), TreeError> {
        let p = self.find_mut(parent).ok_or(TreeError::NotFound(parent))?;
        child.renumber(p.depth + 1);
        p.children.push(child);
        Ok(())
    }

    /// Detach and return the subtree rooted at `id`. The root itself cannot
    /// be detached.
    pub fn detach(&mut self, id: NodeId) -> Result<Self, TreeError> {
        if self.id == id {
            return Err(TreeError::DetachRoot(id));
        }
        self.detach_below(id).ok_or(TreeError::NotFound(id))
    }

    /// Verify the depth invariant for this whole subtree, treating `self` as
    /// correctly numbered.
    pub fn check_depths(&self) -> Result<(), TreeError> {
        for node in self.iter() {
            for child in &node.children {
                if child.depth != node.depth + 1 {
                    return Err(TreeError::Depth {
                        id: child.id,
                        expected: node.depth + 1,
                        found: child.depth,
                    });
                }
            }
        }
        Ok(())
    }

    /// Rebuild a node from its parts. Depths below `self` are renumbered from
    /// its own depth. Used by the filter when constructing a pruned copy.
    pub(crate) fn clone_with_children(&self, children: Vec<Self>) -> Self {
        let mut node = Self {
            id: self.id,
            title: self.title.clone(),
            category: self.category.clone(),
            included: self.included,
            depth: self.depth,
            children,
        };
        node.renumber(self.depth);
        node
    }

    fn renumber(&mut self, depth: u32) {
        self.depth = depth;
        for child in &mut self.children {
            child.renumber(depth + 1);
        }
    }

    fn detach_below(&mut self, id: NodeId) -> Option<Self> {
        if let Some(pos) = self.children.iter().position(|c| c.id == id) {
            return Some(self.children.remove(pos));
        }
        self.children.iter_mut().find_map(|c| c.detach_below(id))
    }
}

/// Pre-order depth-first iterator over a subtree. See [`Node::iter`].
#[derive(Clone, Debug)]
pub struct Nodes<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // The `.rev()` means children are visited in the order they are
        // stored in `node.children`.
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> Node {
        // root -> [a -> [c, d], b]
        Node::new(NodeId(1), "root", Category::Root)
            .with_child(
                Node::new(NodeId(2), "a", Category::Branch)
                    .with_child(Node::new(NodeId(4), "c", Category::Leaf))
                    .with_child(Node::new(NodeId(5), "d", Category::Fruit)),
            )
            .with_child(Node::new(NodeId(3), "b", Category::Branch))
    }

    #[test]
    fn preorder_iteration() {
        let tree = sample();
        let order: Vec<i64> = tree.iter().map(|n| n.id().get()).collect();
        assert_eq!(order, vec![1, 2, 4, 5, 3]);
        assert_eq!(tree.count(), 5);
    }

    #[test]
    fn depths_follow_position() {
        let tree = sample();
        assert_eq!(tree.depth(), 0);
        for node in tree.iter() {
            for child in node.children() {
                assert_eq!(child.depth(), node.depth() + 1);
            }
        }
        tree.check_depths().unwrap();
    }

    #[test]
    fn attach_renumbers_subtree() {
        let mut tree = sample();
        // A detached subtree starts at depth 0...
        let graft = Node::new(NodeId(6), "graft", Category::Branch)
            .with_child(Node::new(NodeId(7), "tip", Category::Leaf));
        assert_eq!(graft.depth(), 0);

        // ...and is renumbered when attached below `c` (depth 2).
        tree.attach_child(NodeId(4), graft).unwrap();
        assert_eq!(tree.find(NodeId(6)).unwrap().depth(), 3);
        assert_eq!(tree.find(NodeId(7)).unwrap().depth(), 4);
        tree.check_depths().unwrap();
    }

    #[test]
    fn attach_to_unknown_parent_fails() {
        let mut tree = sample();
        let leaf = Node::new(NodeId(9), "x", Category::Leaf);
        assert_eq!(
            tree.attach_child(NodeId(99), leaf),
            Err(TreeError::NotFound(NodeId(99)))
        );
    }

    #[test]
    fn detach_returns_whole_subtree() {
        let mut tree = sample();
        let detached = tree.detach(NodeId(2)).unwrap();
        assert_eq!(detached.count(), 3);
        assert_eq!(tree.count(), 2);
        assert!(tree.find(NodeId(4)).is_none());
        tree.check_depths().unwrap();
    }

    #[test]
    fn detach_root_is_refused() {
        let mut tree = sample();
        assert_eq!(
            tree.detach(NodeId(1)),
            Err(TreeError::DetachRoot(NodeId(1)))
        );
    }

    #[test]
    fn parent_lookup() {
        let tree = sample();
        assert_eq!(tree.parent_of(NodeId(4)).map(Node::id), Some(NodeId(2)));
        assert_eq!(tree.parent_of(NodeId(2)).map(Node::id), Some(NodeId(1)));
        assert!(tree.parent_of(NodeId(1)).is_none());
        assert!(tree.parent_of(NodeId(42)).is_none());
    }

    #[test]
    fn find_mut_edits_in_place() {
        let mut tree = sample();
        tree.find_mut(NodeId(5)).unwrap().title = String::from("renamed");
        assert_eq!(tree.find(NodeId(5)).unwrap().title, "renamed");
    }
}
