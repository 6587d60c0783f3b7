// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gateway contract a persistence backend must satisfy.

use espalier_tree::NodeId;

use crate::assemble::AssembleError;
use crate::record::SquareRecord;

/// Errors surfaced by a [`SquareStore`] or by tree assembly.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The id has no record.
    #[error("no record with id {0}")]
    NotFound(NodeId),
    /// A record was rejected before any mutation took place.
    #[error("record is missing required field `{0}`")]
    MissingField(&'static str),
    /// The flat record set does not describe a valid tree.
    #[error(transparent)]
    Invalid(#[from] AssembleError),
    /// Network or storage failure, surfaced untranslated. Whether and when to
    /// retry is the caller's decision; the store never retries on its own.
    #[error("storage I/O failure: {0}")]
    Io(String),
}

/// What the core needs from a persistence backend, and nothing more.
///
/// The five near-identical SQL backends this system talks to collapse into
/// this one contract; dialect and transport are implementation details behind
/// it. [`crate::MemoryStore`] is the reference implementation.
///
/// Contract:
///
/// - `load_all` returns every record, in stored order. Child order within a
///   parent is the order records appear here.
/// - `save` is an idempotent upsert keyed by `id`. A record without an id is
///   a creation; the echoed record carries the assigned id. Validation
///   failures reject the call before anything is written.
/// - `delete` removes exactly one record. Cascading over descendants is a
///   policy of the caller ([`crate::Session::remove`]), not of the store.
pub trait SquareStore {
    /// Fetch the flat record set for the whole tree.
    fn load_all(&mut self) -> Result<Vec<SquareRecord>, StoreError>;

    /// Upsert one record; the echo carries the persisted state including the
    /// assigned id.
    fn save(&mut self, record: &SquareRecord) -> Result<SquareRecord, StoreError>;

    /// Remove one record by id.
    fn delete(&mut self, id: NodeId) -> Result<(), StoreError>;

    /// Upsert a batch in order, stopping at the first failure.
    fn save_all(&mut self, records: &[SquareRecord]) -> Result<(), StoreError> {
        for record in records {
            self.save(record)?;
        }
        Ok(())
    }
}
