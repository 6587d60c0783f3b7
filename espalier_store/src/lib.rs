// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Espalier Store: the persistence boundary of the square tree.
//!
//! The tree itself lives in [`espalier_tree`]; this crate owns everything on
//! the far side of it:
//!
//! - [`SquareRecord`]: the flat wire/storage shape of one node, with the
//!   field names REST backends use (`parentId`, `type`, and the legacy form
//!   fields).
//! - [`SquareStore`]: the two-and-a-half-operation gateway contract a backend
//!   must satisfy: `load_all`, idempotent `save` keyed by id, and
//!   `delete`. SQL dialects, HTTP frameworks, and retry policy are all the
//!   backend's business, not this crate's.
//! - [`assemble`]: reconstruction of an owned tree from flat records, with
//!   strict validation (single root, parents present, depths consistent)
//!   before any tree is handed out.
//! - [`MemoryStore`]: the in-memory reference implementation of the contract,
//!   used by examples and tests.
//! - [`Session`]: the context object that owns the current tree, the store,
//!   and the reload lifecycle. Reloads are ticketed so that when requests
//!   overlap, only the most recently started one may replace the tree;
//!   superseded responses are discarded, never applied.
//!
//! Every failure is surfaced to the caller as a [`StoreError`] or
//! [`SessionError`]; nothing is logged-and-swallowed.
//!
//! ## Example
//!
//! ```rust
//! use espalier_store::{MemoryStore, Session, SquareRecord, SquareStore};
//! use espalier_tree::{Category, NodeId};
//!
//! let mut store = MemoryStore::new();
//! store.save_all(&[
//!     SquareRecord::seed(1, "all", "root", None, 0),
//!     SquareRecord::seed(2, "trunk", "branch", Some(1), 1),
//! ]).unwrap();
//!
//! let mut session = Session::new(store);
//! session.reload().unwrap();
//!
//! let id = session
//!     .include_leaf(NodeId(2), "bud", Category::Fruit)
//!     .unwrap();
//! assert_eq!(session.tree().unwrap().find(id).unwrap().depth(), 2);
//! ```

mod assemble;
mod gateway;
mod memory;
mod record;
mod session;

pub use assemble::{AssembleError, assemble, flatten};
pub use gateway::{SquareStore, StoreError};
pub use memory::MemoryStore;
pub use record::SquareRecord;
pub use session::{DeletePolicy, ReloadTicket, Session, SessionError};
