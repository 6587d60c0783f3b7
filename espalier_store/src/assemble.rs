// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconstruction of an owned tree from flat persistence records.

use espalier_tree::{Node, NodeId};
use hashbrown::{HashMap, HashSet};

use crate::record::SquareRecord;

/// Ways a flat record set can fail to describe a valid tree.
///
/// Assembly validates before any tree is exposed; a partial or repaired tree
/// is never returned.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AssembleError {
    /// No record with a null `parentId`.
    #[error("no root record (null parentId) was found")]
    MissingRoot,
    /// More than one record with a null `parentId`.
    #[error("more than one root record: {0} and {1}")]
    MultipleRoots(NodeId, NodeId),
    /// Two records share an id.
    #[error("duplicate record id {0}")]
    DuplicateId(NodeId),
    /// A loaded record has no id at all.
    #[error("record \"{title}\" has no id")]
    MissingId {
        /// Title of the id-less record.
        title: String,
    },
    /// A record points at a parent id that matches no record.
    #[error("record {id} references missing parent {parent}")]
    Orphan {
        /// The dangling record.
        id: NodeId,
        /// The parent id it names.
        parent: NodeId,
    },
    /// A record's stored depth disagrees with its position under the root.
    #[error("record {id} stores depth {stored}, its position implies {computed}")]
    Depth {
        /// The offending record.
        id: NodeId,
        /// Depth as stored.
        stored: u32,
        /// Depth implied by the parent chain.
        computed: u32,
    },
    /// Records whose parent chains never reach the root (which is how a
    /// parent-id cycle in the flat data shows up).
    #[error("records {0:?} are not reachable from the root")]
    Unreachable(Vec<NodeId>),
}

/// Build the tree a flat record set describes.
///
/// Records are grouped by `parentId`; children attach in the order their
/// records appear, which is the order the store returned them in. Stored
/// depths are checked against the computed position, so the depth invariant
/// holds on every tree this function returns.
pub fn assemble(records: &[SquareRecord]) -> Result<Node, AssembleError> {
    let mut seen: HashSet<i64> = HashSet::with_capacity(records.len());
    let mut by_parent: HashMap<i64, Vec<(i64, &SquareRecord)>> = HashMap::new();
    let mut root: Option<(i64, &SquareRecord)> = None;

    for record in records {
        let id = record.id.ok_or_else(|| AssembleError::MissingId {
            title: record.title.clone(),
        })?;
        if !seen.insert(id) {
            return Err(AssembleError::DuplicateId(NodeId(id)));
        }
        match record.parent_id {
            None => match root {
                None => root = Some((id, record)),
                Some((first, _)) => {
                    return Err(AssembleError::MultipleRoots(NodeId(first), NodeId(id)));
                }
            },
            Some(parent) => by_parent.entry(parent).or_default().push((id, record)),
        }
    }

    let (root_id, root_record) = root.ok_or(AssembleError::MissingRoot)?;

    for (&parent, children) in &by_parent {
        if !seen.contains(&parent)
            && let Some(&(id, _)) = children.first()
        {
            return Err(AssembleError::Orphan {
                id: NodeId(id),
                parent: NodeId(parent),
            });
        }
    }

    let tree = build(root_id, root_record, 0, &by_parent)?;

    // Whatever did not get attached sits on a parent chain that never reaches
    // the root, i.e. a cycle in the flat data.
    if tree.count() != records.len() {
        let stranded: Vec<NodeId> = records
            .iter()
            .filter_map(|r| r.id.map(NodeId))
            .filter(|id| tree.find(*id).is_none())
            .collect();
        return Err(AssembleError::Unreachable(stranded));
    }

    Ok(tree)
}

fn build(
    id: i64,
    record: &SquareRecord,
    computed_depth: u32,
    by_parent: &HashMap<i64, Vec<(i64, &SquareRecord)>>,
) -> Result<Node, AssembleError> {
    if record.depth != computed_depth {
        return Err(AssembleError::Depth {
            id: NodeId(id),
            stored: record.depth,
            computed: computed_depth,
        });
    }
    let mut node = Node::new(NodeId(id), record.title.clone(), record.category());
    node.included = record.included;
    if let Some(children) = by_parent.get(&id) {
        for &(child_id, child_record) in children {
            node = node.with_child(build(child_id, child_record, computed_depth + 1, by_parent)?);
        }
    }
    Ok(node)
}

/// The inverse of [`assemble`]: the flat record set for a tree, in pre-order.
#[must_use]
pub fn flatten(root: &Node) -> Vec<SquareRecord> {
    fn push(node: &Node, parent: Option<NodeId>, out: &mut Vec<SquareRecord>) {
        out.push(SquareRecord::from_node(node, parent));
        for child in node.children() {
            push(child, Some(node.id()), out);
        }
    }
    let mut out = Vec::with_capacity(root.count());
    push(root, None, &mut out);
    out
}
