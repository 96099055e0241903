/// Indexing engine — root resolution, session state, and the public
/// [`index`] entry point.
///
/// One call to [`index`] processes one root path to completion:
/// resolve, stat, write the root marker, then walk the tree depth-first.
/// The walk is strictly single-threaded and synchronous; recursion depth
/// is bounded only by the depth of the real tree.
mod error;
mod walk;

pub use error::IndexError;

use crate::model::size::format_size;
use crate::store::Store;
use rustix::fs::CWD;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Per-run indexing options.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexOptions {
    /// Refuse to descend into entries on a different filesystem than
    /// the one the walk started on.
    pub one_file_system: bool,
}

/// Totals accumulated over one fully indexed root path.
///
/// The same numbers are reported on the informational log line; they are
/// not part of the stored record model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexReport {
    /// Canonical, symlink-free form of the requested root path.
    pub root: PathBuf,
    /// Non-directory entries visited.
    pub files: u64,
    /// Directories visited, excluding the root itself.
    pub directories: u64,
    /// Total byte size of everything beneath the root.
    pub bytes: u64,
}

/// Transient per-path state carried through the recursive walk.
struct IndexSession<'a, S: Store> {
    store: &'a mut S,
    one_file_system: bool,
    /// Device id of the first directory entered; entries on any other
    /// device are skipped when `one_file_system` is set.
    device: Option<u64>,
    file_count: u64,
    dir_count: u64,
    depth: usize,
}

/// Index one root path into `store`.
///
/// Resolves `path` to a canonical absolute path, writes a root marker,
/// and walks the tree, committing one aggregate per visited directory.
/// Returns the accumulated totals, or an [`IndexError`] if the root
/// itself could not be resolved or statted. Failures below the root are
/// logged as warnings and never abort the call.
pub fn index<S: Store>(
    store: &mut S,
    path: impl AsRef<Path>,
    options: IndexOptions,
) -> Result<IndexReport, IndexError> {
    let path = path.as_ref();

    let canonical =
        fs::canonicalize(path).map_err(|source| IndexError::from_resolve(path, source))?;

    // lstat, not stat: canonicalization already resolved symlinks, and a
    // trailing symlink racing in afterwards must not be followed.
    let root_stat = rustix::fs::lstat(canonical.as_path())
        .map_err(|errno| IndexError::from_root_stat(path, errno.into()))?;

    let device = root_stat.st_dev as u64;
    let inode = root_stat.st_ino as u64;
    if let Err(err) = store.write_root(&canonical, device, inode) {
        warn!("Error storing root marker for {}: {err}", canonical.display());
    }

    let mut session = IndexSession {
        store,
        one_file_system: options.one_file_system,
        device: None,
        file_count: 0,
        dir_count: 0,
        depth: 0,
    };

    // The canonical path is absolute, so the directory-fd argument is
    // never consulted for this first open.
    let bytes = session.index_dir(canonical.as_os_str(), CWD, &root_stat);

    info!(
        "Indexed {} files and {} directories, {} ({} bytes)",
        session.file_count,
        session.dir_count,
        format_size(bytes),
        bytes
    );

    Ok(IndexReport {
        root: canonical,
        files: session.file_count,
        directories: session.dir_count,
        bytes,
    })
}
