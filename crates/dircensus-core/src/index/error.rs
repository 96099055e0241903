/// Per-path fatal errors — the only failures that abort an `index` call.
///
/// Everything that goes wrong during descent is a warning, never an
/// error; only resolving the root path and statting the resolved root
/// can fail a path outright.
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a root path could not be indexed at all.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The supplied path does not exist.
    #[error("path not found: {}", .path.display())]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The supplied path exists but is not accessible.
    #[error("permission denied: {}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other resolution or stat failure.
    #[error("cannot index {}: {}", .path.display(), .source)]
    Unknown {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IndexError {
    /// Classify a path-resolution failure.
    pub(crate) fn from_resolve(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::PathNotFound { path, source },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Unknown { path, source },
        }
    }

    /// Classify a failure to stat the already-resolved root.
    ///
    /// Unlike resolution, a missing resolved path is not reported as
    /// not-found: the path existed moments ago, so anything but a
    /// permission error is an unknown failure.
    pub(crate) fn from_root_stat(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Unknown { path, source },
        }
    }
}
