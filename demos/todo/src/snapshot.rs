//! JSON snapshots of the list.
//!
//! Persistence is a subscriber like any other: the reducer never touches the
//! filesystem.

use crate::{TodoReducer, TodoState};
use reflux_runtime::{Store, Subscription};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Snapshot errors
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed
    #[error("Snapshot I/O error at {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON for a todo list
    #[error("Snapshot format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `state` to `path` as pretty-printed JSON
///
/// # Errors
///
/// Returns [`SnapshotError`] if serialization or the write fails.
pub fn save_snapshot(path: &Path, state: &TodoState) -> Result<(), SnapshotError> {
    let json = serde_json::to_vec_pretty(state)?;
    fs::write(path, json).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a state from `path`
///
/// A missing file is not an error: it yields `None`.
///
/// # Errors
///
/// Returns [`SnapshotError`] if the file exists but cannot be read or parsed.
pub fn load_snapshot(path: &Path) -> Result<Option<TodoState>, SnapshotError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })
        },
    };

    Ok(Some(serde_json::from_slice(&bytes)?))
}

/// Save a snapshot to `path` after every dispatch
pub fn persist_to(store: &Arc<Store<TodoReducer>>, path: impl Into<PathBuf>) -> Subscription {
    let weak = Arc::downgrade(store);
    let path = path.into();

    store.subscribe(move || {
        let Some(store) = weak.upgrade() else {
            return;
        };

        let state = store.get_state();
        match save_snapshot(&path, &state) {
            Ok(()) => tracing::debug!(path = %path.display(), items = state.count(), "Snapshot saved"),
            Err(error) => tracing::error!(%error, "Failed to save snapshot"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TodoAction;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("todo-snapshot-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        assert!(load_snapshot(&path).unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save-load");
        let state = TodoState::from_items(["buy groceries", "watch baseball"]);

        save_snapshot(&path, &state).unwrap();
        let loaded = load_snapshot(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, Some(state));
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_path("invalid");
        fs::write(&path, b"not json").unwrap();
        let result = load_snapshot(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_persist_to_saves_after_dispatch() {
        let path = temp_path("persist");
        let store = Arc::new(Store::new(TodoReducer::new()));
        let subscription = persist_to(&store, &path);

        store.dispatch(TodoAction::add_item("milk")).unwrap();
        assert!(subscription.unsubscribe());

        let loaded = load_snapshot(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, Some(TodoState::from_items(["milk"])));
    }
}
