use std::path::Path;
use tracing::debug;

use crate::domain::value_objects::WorkingCopyState;

/// Inspect `path` to decide how it can be synchronized
///
/// Only `path` itself is checked; parent repositories are not discovered.
pub fn inspect_working_copy(path: &Path) -> WorkingCopyState {
    if !path.is_dir() {
        return WorkingCopyState::Missing;
    }

    match git2::Repository::open(path) {
        Ok(_) => WorkingCopyState::Repository,
        Err(error) => {
            debug!(path = %path.display(), %error, "directory is not a git repository");
            WorkingCopyState::Directory
        }
    }
}
