/// Store interface — the record sink the traversal engine writes into.
///
/// The engine is backend-agnostic: it only needs somewhere to put one
/// root marker per indexed path and one committed [`DirAggregate`] per
/// visited directory. Durable backends plug in behind the [`Store`]
/// trait; this crate ships [`MemoryStore`] for tests and frontends that
/// do not persist.
pub mod memory;

pub use memory::MemoryStore;

use crate::model::DirAggregate;
use std::path::Path;
use thiserror::Error;

/// How a store session is opened.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    /// Open the store writable. Indexing requires this.
    pub read_write: bool,

    /// Favour compact stored size over raw write speed. Purely a hint;
    /// backends without a size/speed tradeoff ignore it.
    pub compact: bool,
}

/// Errors surfaced by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write was attempted on a session opened read-only.
    #[error("store is not writable")]
    ReadOnly,

    /// Backend I/O failure.
    #[error("store backend error: {0}")]
    Backend(#[from] std::io::Error),
}

/// The record sink: persists root markers and per-directory aggregates.
///
/// The engine calls [`Store::commit_directory`] exactly once per visited
/// directory, after that directory's enumeration completes, and
/// [`Store::write_root`] exactly once per indexed path, before descent
/// begins. Commit consumes the aggregate.
pub trait Store {
    /// Persist a root marker associating a canonical path with the
    /// (device, inode) identity of the directory it names.
    fn write_root(&mut self, path: &Path, device: u64, inode: u64) -> Result<(), StoreError>;

    /// Finalize and persist one directory's aggregate under the
    /// directory's own (device, inode) identity.
    fn commit_directory(
        &mut self,
        device: u64,
        inode: u64,
        aggregate: DirAggregate,
    ) -> Result<(), StoreError>;
}
