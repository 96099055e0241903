/// Recursive depth-first walk — one [`IndexSession::index_dir`] frame per
/// directory.
///
/// Every open and stat during descent is relative to the already-open
/// parent directory fd. Paths are never re-resolved from strings below
/// the root, so a symlink swapped in mid-walk cannot redirect the walk
/// (no time-of-check/time-of-use window).
use super::IndexSession;
use crate::model::{DirAggregate, EntryRecord};
use crate::store::Store;
use rustix::fs::{openat, statat, AtFlags, Dir, FileType, Mode, OFlags, Stat};
use rustix::io::Errno;
use std::ffi::OsStr;
use std::io;
use std::os::fd::{AsFd, BorrowedFd, OwnedFd};
use std::os::unix::ffi::OsStrExt;
use tracing::{debug, warn};

/// Flags for every directory opened during descent: read-only, never
/// follow a symlink, fail unless it is a directory, never become the
/// controlling terminal.
const DIR_OPEN_FLAGS: OFlags = OFlags::RDONLY
    .union(OFlags::NOCTTY)
    .union(OFlags::DIRECTORY)
    .union(OFlags::NOFOLLOW);

/// Initial entry-capacity hint for each directory aggregate.
const ENTRY_COUNT_HINT: usize = 8;

/// Open `name` relative to `parent`, suppressing access-time updates
/// where possible.
///
/// `O_NOATIME` is refused with `EPERM` when the caller does not own the
/// file or the mount disallows it; that exact failure gets one retry
/// without the flag. Every other failure is returned as-is.
fn open_dir_at(parent: BorrowedFd<'_>, name: &OsStr) -> Result<OwnedFd, Errno> {
    match openat(
        parent,
        name,
        DIR_OPEN_FLAGS.union(OFlags::NOATIME),
        Mode::empty(),
    ) {
        Err(errno) if errno == Errno::PERM => openat(parent, name, DIR_OPEN_FLAGS, Mode::empty()),
        other => other,
    }
}

impl<S: Store> IndexSession<'_, S> {
    /// Whether boundary enforcement rejects an entry residing on `device`.
    ///
    /// Only meaningful once the indexing device has been recorded, which
    /// happens before the first entry of the first directory is examined.
    fn crosses_device(&self, device: u64) -> bool {
        self.one_file_system && self.device != Some(device)
    }

    /// Visit the directory `name` (relative to the open `parent` fd),
    /// returning the total byte size of everything beneath it.
    ///
    /// `dir_stat` is this directory's own lstat, obtained by the parent
    /// frame; it supplies the (device, inode) identity the finished
    /// aggregate is committed under. A directory that cannot be opened
    /// or listed contributes 0 and commits nothing.
    pub(super) fn index_dir(
        &mut self,
        name: &OsStr,
        parent: BorrowedFd<'_>,
        dir_stat: &Stat,
    ) -> u64 {
        let fd = match open_dir_at(parent, name) {
            Ok(fd) => fd,
            Err(errno) => {
                warn!(
                    "Skipping {}: {}",
                    name.to_string_lossy(),
                    io::Error::from(errno)
                );
                return 0;
            }
        };

        let dir = match Dir::read_from(&fd) {
            Ok(dir) => dir,
            Err(errno) => {
                warn!(
                    "Skipping {}: {}",
                    name.to_string_lossy(),
                    io::Error::from(errno)
                );
                return 0;
            }
        };

        let mut aggregate = DirAggregate::with_capacity(ENTRY_COUNT_HINT);
        let mut size_total: u64 = 0;

        if self.device.is_none() {
            self.device = Some(dir_stat.st_dev as u64);
        }

        for entry in dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(errno) => {
                    warn!(
                        "Error listing {}: {}",
                        name.to_string_lossy(),
                        io::Error::from(errno)
                    );
                    break;
                }
            };

            // Skip . and ..; every other dot-name is a real entry.
            let entry_name = entry.file_name();
            let bytes = entry_name.to_bytes();
            if bytes == b"." || bytes == b".." {
                continue;
            }

            let stat = match statat(
                &fd,
                entry_name,
                AtFlags::SYMLINK_NOFOLLOW | AtFlags::NO_AUTOMOUNT,
            ) {
                Ok(stat) => stat,
                Err(errno) => {
                    warn!(
                        "Error statting {}: {}",
                        entry_name.to_string_lossy(),
                        io::Error::from(errno)
                    );
                    continue;
                }
            };

            if self.crosses_device(stat.st_dev as u64) {
                warn!(
                    "Skipping {}: different file system",
                    entry_name.to_string_lossy()
                );
                continue;
            }

            let entry_name = OsStr::from_bytes(bytes);
            let size = if FileType::from_raw_mode(stat.st_mode as _) == FileType::Directory {
                self.depth += 1;
                let size = self.index_dir(entry_name, fd.as_fd(), &stat);
                self.depth -= 1;
                self.dir_count += 1;
                size
            } else {
                self.file_count += 1;
                stat.st_size as u64
            };

            debug!(
                "{} {} (depth {})",
                entry_name.to_string_lossy(),
                size,
                self.depth
            );

            aggregate.push(EntryRecord {
                name: entry_name.to_owned(),
                size,
                mode: stat.st_mode as u32,
                device: stat.st_dev as u64,
                inode: stat.st_ino as u64,
            });
            size_total += size;
        }

        if let Err(err) = self
            .store
            .commit_directory(dir_stat.st_dev as u64, dir_stat.st_ino as u64, aggregate)
        {
            warn!("Error storing {}: {err}", name.to_string_lossy());
        }

        size_total
    }
}
