// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session state: the one owner of the displayed tree.

use espalier_tree::{Category, Node, NodeId, TreeError};
use tracing::{debug, info};

use crate::assemble::assemble;
use crate::gateway::{SquareStore, StoreError};
use crate::record::SquareRecord;

/// Errors from session operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// No reload has completed yet; there is no tree to act on.
    #[error("no tree has been loaded yet")]
    NoTree,
    /// The id names no node in the current tree.
    #[error("no node with id {0}")]
    NotFound(NodeId),
    /// A refuse-policy removal hit a node that still has children.
    #[error("node {0} still has children")]
    HasChildren(NodeId),
    /// The root is never removable.
    #[error("the root node cannot be removed")]
    RemoveRoot,
    /// A structural tree operation failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The gateway reported a failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What to do with descendants when removing a node.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DeletePolicy {
    /// Refuse the removal if the node has children.
    #[default]
    Refuse,
    /// Delete the whole subtree, deepest nodes first, so the store never
    /// holds an orphan even if a later delete fails.
    Cascade,
}

/// Handle identifying one reload attempt. See [`Session::begin_reload`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReloadTicket(u64);

/// The single logical owner of the displayed tree.
///
/// A `Session` replaces free-standing mutable state: it owns the store, the
/// current tree, and the reload lifecycle, and every mutation flows through
/// it. It is created at app start, holds one tree at a time (replaced
/// wholesale on reload), and is simply dropped on teardown.
///
/// Mutations go to the gateway first and touch the in-memory tree only after
/// the gateway accepted them, so a failed save never leaves the display ahead
/// of the store.
///
/// ## Reload races
///
/// While a load is pending the previously loaded tree stays in place; there
/// are no partial states. When loads overlap, the most recently started one
/// wins: [`Session::finish_reload`] discards any response whose
/// [`ReloadTicket`] has been superseded.
///
/// ```rust
/// use espalier_store::{MemoryStore, Session, SquareRecord, SquareStore};
///
/// let mut store = MemoryStore::new();
/// store
///     .save_all(&[SquareRecord::seed(1, "old", "root", None, 0)])
///     .unwrap();
/// let old = store.load_all().unwrap();
/// store
///     .save(&SquareRecord::seed(1, "new", "root", None, 0))
///     .unwrap();
/// let new = store.load_all().unwrap();
///
/// let mut session = Session::new(store);
/// let stale = session.begin_reload();
/// let fresh = session.begin_reload();
///
/// // Responses can arrive out of order; only the fresh one applies.
/// assert!(session.finish_reload(fresh, &new).unwrap());
/// assert!(!session.finish_reload(stale, &old).unwrap());
/// assert_eq!(session.tree().unwrap().title, "new");
/// ```
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    tree: Option<Node>,
    epoch: u64,
}

impl<S: SquareStore> Session<S> {
    /// Create a session over a store. No tree is loaded yet.
    pub fn new(store: S) -> Self {
        Self {
            store,
            tree: None,
            epoch: 0,
        }
    }

    /// The currently displayed tree, if a reload has completed.
    #[must_use]
    pub fn tree(&self) -> Option<&Node> {
        self.tree.as_ref()
    }

    /// The backing store.
    pub fn store(&mut self) -> &mut S {
        &mut self.store
    }

    /// Load, assemble, and swap in the tree, in one synchronous call.
    pub fn reload(&mut self) -> Result<&Node, SessionError> {
        let ticket = self.begin_reload();
        let records = self.store.load_all()?;
        self.finish_reload(ticket, &records)?;
        self.tree.as_ref().ok_or(SessionError::NoTree)
    }

    /// Start a reload attempt, superseding any attempt already in flight.
    pub fn begin_reload(&mut self) -> ReloadTicket {
        self.epoch += 1;
        debug!(epoch = self.epoch, "reload started");
        ReloadTicket(self.epoch)
    }

    /// Complete a reload attempt with the records its load returned.
    ///
    /// Returns `true` if the tree was replaced, `false` if the ticket was
    /// superseded by a newer [`Session::begin_reload`] and the response was
    /// discarded. Assembly failures are returned only for current tickets; a
    /// stale response is discarded without being validated.
    pub fn finish_reload(
        &mut self,
        ticket: ReloadTicket,
        records: &[SquareRecord],
    ) -> Result<bool, SessionError> {
        if ticket.0 != self.epoch {
            debug!(
                ticket = ticket.0,
                epoch = self.epoch,
                "discarding superseded reload response"
            );
            return Ok(false);
        }
        let tree = assemble(records).map_err(StoreError::from)?;
        info!(epoch = self.epoch, nodes = tree.count(), "tree replaced");
        self.tree = Some(tree);
        Ok(true)
    }

    /// Change a node's display label, store first.
    pub fn rename(&mut self, id: NodeId, title: &str) -> Result<(), SessionError> {
        let record = SquareRecord {
            title: title.to_owned(),
            ..self.record_for(id)?
        };
        self.store.save(&record)?;
        if let Some(node) = self.tree.as_mut().and_then(|t| t.find_mut(id)) {
            node.title = title.to_owned();
        }
        debug!(id = id.get(), "renamed node");
        Ok(())
    }

    /// Toggle a node's inclusion flag, store first.
    ///
    /// Exclusion is display-only: the node keeps its place in the tree and in
    /// the store, and renders de-emphasized.
    pub fn set_included(&mut self, id: NodeId, included: bool) -> Result<(), SessionError> {
        let record = SquareRecord {
            included,
            ..self.record_for(id)?
        };
        self.store.save(&record)?;
        if let Some(node) = self.tree.as_mut().and_then(|t| t.find_mut(id)) {
            node.included = included;
        }
        debug!(id = id.get(), included, "toggled inclusion");
        Ok(())
    }

    /// Create a new leaf under `parent`: save an id-less record, then attach
    /// the echoed node. Returns the assigned id.
    pub fn include_leaf(
        &mut self,
        parent: NodeId,
        title: &str,
        category: Category,
    ) -> Result<NodeId, SessionError> {
        let depth = {
            let tree = self.tree.as_ref().ok_or(SessionError::NoTree)?;
            tree.find(parent)
                .ok_or(SessionError::NotFound(parent))?
                .depth()
                + 1
        };
        let record = SquareRecord {
            id: None,
            title: title.to_owned(),
            category: category.as_str().to_owned(),
            included: true,
            depth,
            parent_id: Some(parent.get()),
            name: None,
            size: None,
            color: None,
            kind: None,
        };
        let echoed = self.store.save(&record)?;
        let id = NodeId(echoed.id.ok_or(StoreError::MissingField("id"))?);
        if let Some(tree) = self.tree.as_mut() {
            tree.attach_child(parent, Node::new(id, title, category))?;
        }
        info!(id = id.get(), parent = parent.get(), "included new leaf");
        Ok(id)
    }

    /// Remove a node, applying the given descendant policy. The root is never
    /// removable.
    pub fn remove(&mut self, id: NodeId, policy: DeletePolicy) -> Result<(), SessionError> {
        let doomed: Vec<NodeId> = {
            let tree = self.tree.as_ref().ok_or(SessionError::NoTree)?;
            if tree.id() == id {
                return Err(SessionError::RemoveRoot);
            }
            let node = tree.find(id).ok_or(SessionError::NotFound(id))?;
            match policy {
                DeletePolicy::Refuse if !node.children().is_empty() => {
                    return Err(SessionError::HasChildren(id));
                }
                DeletePolicy::Refuse => vec![id],
                DeletePolicy::Cascade => {
                    let mut subtree: Vec<(u32, NodeId)> =
                        node.iter().map(|n| (n.depth(), n.id())).collect();
                    // Deepest first: a child is always gone before its parent.
                    subtree.sort_by(|a, b| b.0.cmp(&a.0));
                    subtree.into_iter().map(|(_, nid)| nid).collect()
                }
            }
        };
        for nid in &doomed {
            self.store.delete(*nid)?;
        }
        if let Some(tree) = self.tree.as_mut() {
            tree.detach(id)?;
        }
        info!(id = id.get(), removed = doomed.len(), "removed subtree");
        Ok(())
    }

    fn record_for(&self, id: NodeId) -> Result<SquareRecord, SessionError> {
        let tree = self.tree.as_ref().ok_or(SessionError::NoTree)?;
        let node = tree.find(id).ok_or(SessionError::NotFound(id))?;
        let parent = tree.parent_of(id).map(Node::id);
        Ok(SquareRecord::from_node(node, parent))
    }
}
