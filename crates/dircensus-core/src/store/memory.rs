/// In-memory store — keeps every record in process memory.
///
/// Used by the test suite and by frontends that only want the walk and
/// its logging, not durable records. Re-committing a directory (for
/// example when the same tree is indexed twice into one session)
/// replaces its previous aggregate, matching the keyed-by-identity
/// semantics of durable backends.
use super::{Store, StoreError, StoreOptions};
use crate::model::{DirAggregate, EntryRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A persisted root marker: one per indexed top-level path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootRecord {
    /// Canonical, symlink-free path of the indexed root.
    pub path: PathBuf,
    /// Device id of the root directory.
    pub device: u64,
    /// Inode number of the root directory.
    pub inode: u64,
}

/// Store implementation backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    options: StoreOptions,
    roots: Vec<RootRecord>,
    directories: HashMap<(u64, u64), Vec<EntryRecord>>,
}

impl MemoryStore {
    /// Open a new in-memory session.
    pub fn open(options: StoreOptions) -> Result<Self, StoreError> {
        Ok(Self {
            options,
            roots: Vec::new(),
            directories: HashMap::new(),
        })
    }

    /// Release the session. Dropping has the same effect; this exists so
    /// callers can make the end of the session explicit.
    pub fn close(self) {}

    /// The options this session was opened with.
    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Root markers written so far, in write order.
    pub fn roots(&self) -> &[RootRecord] {
        &self.roots
    }

    /// The committed aggregate for the directory identified by
    /// (`device`, `inode`), if that directory has been committed.
    pub fn directory(&self, device: u64, inode: u64) -> Option<&[EntryRecord]> {
        self.directories.get(&(device, inode)).map(Vec::as_slice)
    }

    /// Number of committed directory aggregates.
    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.options.read_write {
            Ok(())
        } else {
            Err(StoreError::ReadOnly)
        }
    }
}

impl Store for MemoryStore {
    fn write_root(&mut self, path: &Path, device: u64, inode: u64) -> Result<(), StoreError> {
        self.check_writable()?;
        self.roots.push(RootRecord {
            path: path.to_path_buf(),
            device,
            inode,
        });
        Ok(())
    }

    fn commit_directory(
        &mut self,
        device: u64,
        inode: u64,
        aggregate: DirAggregate,
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        self.directories
            .insert((device, inode), aggregate.into_entries());
        Ok(())
    }
}
