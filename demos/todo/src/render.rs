//! Terminal rendering of the list.

use crate::{TodoReducer, TodoState};
use reflux_runtime::{Store, Subscription};
use std::fmt::Write as _;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Render the list as numbered lines
///
/// An empty list renders as `(no items)`.
#[must_use]
pub fn render_items(state: &TodoState) -> String {
    if state.is_empty() {
        return "(no items)\n".to_string();
    }

    let mut out = String::new();
    for (index, item) in state.items.iter().enumerate() {
        let _ = writeln!(out, "{index:>3}. {item}");
    }
    out
}

/// Re-render the list into `out` after every dispatch
///
/// Write failures are logged and otherwise ignored.
pub fn render_to<W>(store: &Arc<Store<TodoReducer>>, out: W) -> Subscription
where
    W: Write + Send + 'static,
{
    let weak = Arc::downgrade(store);
    let out = Mutex::new(out);

    store.subscribe(move || {
        let Some(store) = weak.upgrade() else {
            return;
        };
        let rendered = store.state(render_items);

        let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = out.write_all(rendered.as_bytes()).and_then(|()| out.flush()) {
            tracing::warn!(%error, "Failed to render todo list");
        }
    })
}
