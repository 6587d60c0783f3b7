// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory reference implementation of the gateway contract.

use espalier_tree::NodeId;
use tracing::debug;

use crate::gateway::{SquareStore, StoreError};
use crate::record::SquareRecord;

/// A [`SquareStore`] backed by a plain vector.
///
/// This is the implementation examples and tests run against, and the
/// executable description of what a real backend must do: ids are assigned
/// from a counter at creation, `load_all` preserves insertion order (which is
/// what makes child order stable across reloads), and validation rejects a
/// record before anything is written.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    records: Vec<SquareRecord>,
    next_id: i64,
}

impl MemoryStore {
    /// Create an empty store. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SquareStore for MemoryStore {
    fn load_all(&mut self) -> Result<Vec<SquareRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn save(&mut self, record: &SquareRecord) -> Result<SquareRecord, StoreError> {
        if record.title.is_empty() {
            return Err(StoreError::MissingField("title"));
        }
        if record.category.is_empty() {
            return Err(StoreError::MissingField("category"));
        }
        if let Some(parent) = record.parent_id
            && !self.records.iter().any(|r| r.id == Some(parent))
        {
            return Err(StoreError::NotFound(NodeId(parent)));
        }

        let mut echoed = record.clone();
        match record.id {
            Some(id) => {
                if let Some(existing) = self.records.iter_mut().find(|r| r.id == Some(id)) {
                    *existing = echoed.clone();
                } else {
                    self.records.push(echoed.clone());
                    self.next_id = self.next_id.max(id + 1);
                }
                debug!(id, "upserted record");
            }
            None => {
                echoed.id = Some(self.next_id);
                self.next_id += 1;
                self.records.push(echoed.clone());
                debug!(id = echoed.id, "created record");
            }
        }
        Ok(echoed)
    }

    fn delete(&mut self, id: NodeId) -> Result<(), StoreError> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id == Some(id.get()))
            .ok_or(StoreError::NotFound(id))?;
        self.records.remove(pos);
        debug!(id = id.get(), "deleted record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_assigns_sequential_ids() {
        let mut store = MemoryStore::new();
        let root = store
            .save(&SquareRecord {
                id: None,
                ..SquareRecord::seed(0, "all", "root", None, 0)
            })
            .unwrap();
        assert_eq!(root.id, Some(1));

        let child = store
            .save(&SquareRecord {
                id: None,
                ..SquareRecord::seed(0, "trunk", "branch", Some(1), 1)
            })
            .unwrap();
        assert_eq!(child.id, Some(2));
    }

    #[test]
    fn upsert_is_idempotent() {
        let mut store = MemoryStore::new();
        let record = SquareRecord::seed(1, "all", "root", None, 0);
        store.save(&record).unwrap();
        store.save(&record).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn explicit_ids_advance_the_counter() {
        let mut store = MemoryStore::new();
        store
            .save(&SquareRecord::seed(10, "all", "root", None, 0))
            .unwrap();
        let fresh = store
            .save(&SquareRecord {
                id: None,
                ..SquareRecord::seed(0, "trunk", "branch", Some(10), 1)
            })
            .unwrap();
        assert_eq!(fresh.id, Some(11), "assigned ids never collide");
    }

    #[test]
    fn load_all_preserves_insertion_order() {
        let mut store = MemoryStore::new();
        store
            .save_all(&[
                SquareRecord::seed(1, "all", "root", None, 0),
                SquareRecord::seed(2, "b", "branch", Some(1), 1),
                SquareRecord::seed(3, "a", "branch", Some(1), 1),
            ])
            .unwrap();
        let ids: Vec<Option<i64>> = store.load_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn validation_rejects_before_writing() {
        let mut store = MemoryStore::new();
        let err = store
            .save(&SquareRecord::seed(1, "", "root", None, 0))
            .unwrap_err();
        assert_eq!(err, StoreError::MissingField("title"));
        assert!(store.is_empty());

        let err = store
            .save(&SquareRecord::seed(2, "stray", "leaf", Some(42), 1))
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound(NodeId(42)));
        assert!(store.is_empty());
    }

    #[test]
    fn delete_unknown_id_fails() {
        let mut store = MemoryStore::new();
        assert_eq!(
            store.delete(NodeId(5)),
            Err(StoreError::NotFound(NodeId(5)))
        );
    }
}
