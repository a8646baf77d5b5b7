//! Reducer logic for the todo list.
//!
//! Every handled action builds a new `items` vector; anything that would not
//! change the list returns the input state as-is.

use crate::types::{TodoAction, TodoState};
use reflux_core::reducer::Reducer;
use std::sync::Arc;

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Appends `text`, copying the existing items into a new container
    fn add_item(state: &TodoState, text: &str) -> TodoState {
        let mut items = Vec::with_capacity(state.items.len() + 1);
        items.extend(state.items.iter().cloned());
        items.push(text.to_owned());

        TodoState {
            items: Arc::new(items),
        }
    }

    fn remove_item(state: &TodoState, index: usize) -> TodoState {
        let items = state
            .items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| (i != index).then(|| item.clone()))
            .collect();

        TodoState {
            items: Arc::new(items),
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;

    fn init(&self) -> TodoState {
        TodoState::new()
    }

    fn reduce(&self, state: &Arc<TodoState>, action: &TodoAction) -> Arc<TodoState> {
        match action {
            TodoAction::AddItem { text } => Arc::new(Self::add_item(state, text)),

            TodoAction::RemoveItem { index } if *index < state.items.len() => {
                Arc::new(Self::remove_item(state, *index))
            }

            TodoAction::ClearItems if !state.items.is_empty() => Arc::new(TodoState::new()),

            // Out-of-range removal, clearing an empty list
            TodoAction::RemoveItem { .. } | TodoAction::ClearItems => Arc::clone(state),
        }
    }
}
