/// Per-entry records and the per-directory aggregate they are collected in.
///
/// One [`DirAggregate`] is built while a single directory is being
/// enumerated and handed to the store when that directory's scan
/// completes. Committing consumes the aggregate, so a committed
/// aggregate can never be appended to or committed twice.
use std::ffi::OsString;

/// A single directory entry observed during one directory scan.
///
/// Names are carried in raw filesystem encoding — they are not
/// necessarily valid UTF-8 and are never transcoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    /// Entry name only (NOT the full path).
    pub name: OsString,

    /// Resolved size in bytes. For directories this is the recursively
    /// computed size of everything beneath them; for every other entry
    /// it is the raw lstat size.
    pub size: u64,

    /// File mode and type bits as returned by lstat.
    pub mode: u32,

    /// Device id of the filesystem holding the entry.
    pub device: u64,

    /// Inode number on that device.
    pub inode: u64,
}

/// The in-progress collection of entry records for one directory.
///
/// Created when a directory's enumeration starts, filled entry by entry
/// in enumeration order, and committed under the directory's own
/// (device, inode) identity when enumeration completes.
#[derive(Debug, Default)]
pub struct DirAggregate {
    entries: Vec<EntryRecord>,
}

impl DirAggregate {
    /// Create an empty aggregate sized for `expected_entries`.
    ///
    /// The hint only pre-allocates; the aggregate grows past it freely.
    pub fn with_capacity(expected_entries: usize) -> Self {
        Self {
            entries: Vec::with_capacity(expected_entries),
        }
    }

    /// Append one entry record.
    pub fn push(&mut self, entry: EntryRecord) {
        self.entries.push(entry);
    }

    /// Number of entries collected so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries have been collected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the collected entries in enumeration order.
    pub fn entries(&self) -> &[EntryRecord] {
        &self.entries
    }

    /// Consume the aggregate, yielding its entries for storage.
    pub fn into_entries(self) -> Vec<EntryRecord> {
        self.entries
    }
}
