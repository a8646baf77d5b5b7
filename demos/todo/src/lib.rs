//! Todo list built on a Reflux store.
//!
//! An input form owns a draft; submitting it dispatches `ADD_ITEM` and the
//! reducer appends the text to an immutable list. Rendering, snapshotting and
//! logging are all subscribers.
//!
//! # Quick Start
//!
//! ```
//! use reflux_runtime::Store;
//! use std::sync::Arc;
//! use todo::{FormController, TodoReducer};
//!
//! let store = Arc::new(Store::new(TodoReducer::new()));
//! let mut form = FormController::new(Arc::clone(&store));
//!
//! form.on_change("buy groceries");
//! form.submit()?;
//! form.on_change("watch baseball");
//! form.submit()?;
//!
//! assert_eq!(
//!     store.get_state().items.as_slice(),
//!     ["buy groceries", "watch baseball"]
//! );
//! assert_eq!(form.draft(), "");
//! # Ok::<(), reflux_runtime::StoreError>(())
//! ```

pub mod config;
pub mod form;
pub mod reducer;
pub mod render;
pub mod snapshot;
pub mod types;

// Re-export commonly used types
pub use config::DemoConfig;
pub use form::FormController;
pub use reducer::TodoReducer;
pub use render::{render_items, render_to};
pub use snapshot::{load_snapshot, persist_to, save_snapshot, SnapshotError};
pub use types::{TodoAction, TodoState};
