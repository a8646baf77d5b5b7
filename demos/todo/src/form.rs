//! Input form driving the store.
//!
//! The controller owns the draft text. Submitting dispatches `ADD_ITEM` with
//! the draft and clears it, regardless of what the draft contains.

use crate::{TodoAction, TodoReducer};
use reflux_runtime::{Store, StoreError};
use std::sync::Arc;

/// Draft text plus the store it submits to
#[derive(Debug)]
pub struct FormController {
    store: Arc<Store<TodoReducer>>,
    draft: String,
}

impl FormController {
    /// Create a controller with an empty draft
    #[must_use]
    pub const fn new(store: Arc<Store<TodoReducer>>) -> Self {
        Self {
            store,
            draft: String::new(),
        }
    }

    /// Replace the draft with the field's current text
    pub fn on_change(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Current draft text
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Dispatch the draft as a new item and clear the field
    ///
    /// The draft is cleared even when the dispatch is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ReentrantDispatch`] if called while the store is
    /// already dispatching.
    pub fn submit(&mut self) -> Result<TodoAction, StoreError> {
        let text = std::mem::take(&mut self.draft);
        tracing::debug!(len = text.len(), "Submitting draft");
        self.store.dispatch(TodoAction::AddItem { text })
    }

    /// The store this form dispatches to
    #[must_use]
    pub const fn store(&self) -> &Arc<Store<TodoReducer>> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormController {
        FormController::new(Arc::new(Store::new(TodoReducer::new())))
    }

    #[test]
    fn test_on_change_replaces_draft() {
        let mut form = form();
        form.on_change("buy");
        form.on_change("buy groceries");
        assert_eq!(form.draft(), "buy groceries");
    }

    #[test]
    fn test_submit_dispatches_and_clears() {
        let mut form = form();
        form.on_change("buy groceries");

        let dispatched = form.submit().unwrap();

        assert_eq!(dispatched, TodoAction::add_item("buy groceries"));
        assert_eq!(form.draft(), "");
        assert_eq!(form.store().get_state().items.as_slice(), ["buy groceries"]);
    }

    #[test]
    fn test_submit_empty_draft_appends_empty_item() {
        let mut form = form();
        form.submit().unwrap();
        assert_eq!(form.store().get_state().items.as_slice(), [""]);
    }
}
