// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category filtering: prune a tree to one category plus its scaffolding.

use alloc::vec::Vec;

use crate::node::Node;
use crate::types::Category;

/// Restrict a tree to nodes matching `target`, keeping non-matching ancestors
/// only as scaffolding above a match.
///
/// The rules, applied post-order:
///
/// - A node whose category equals `target` is kept with its entire original
///   subtree; descent stops at a match, so nothing inside it is pruned.
/// - Otherwise the node survives iff at least one recursively filtered child
///   survives, and it is kept with exactly the surviving children.
/// - Otherwise the node is pruned, and `None` means the whole subtree went.
///
/// The input is never mutated; the result is a freshly built tree. Filtering
/// is idempotent: re-filtering a result by the same category is a no-op.
///
/// ```rust
/// use espalier_tree::{Category, Node, NodeId, filter};
///
/// let tree = Node::new(NodeId(1), "root", Category::Root).with_child(
///     Node::new(NodeId(2), "branch", Category::Branch)
///         .with_child(Node::new(NodeId(3), "leaf", Category::Leaf))
///         .with_child(Node::new(NodeId(4), "fruit", Category::Fruit)),
/// );
///
/// let scoped = filter(&tree, &Category::Fruit).unwrap();
/// let kept: Vec<i64> = scoped.iter().map(|n| n.id().get()).collect();
/// assert_eq!(kept, vec![1, 2, 4]); // leaf pruned, branch kept as scaffold
/// assert!(filter(&tree, &Category::Other("missing".into())).is_none());
/// ```
#[must_use]
pub fn filter(node: &Node, target: &Category) -> Option<Node> {
    if node.category == *target {
        return Some(node.clone());
    }
    let survivors: Vec<Node> = node
        .children()
        .iter()
        .filter_map(|child| filter(child, target))
        .collect();
    if survivors.is_empty() {
        None
    } else {
        Some(node.clone_with_children(survivors))
    }
}
