//! Domain types for the Todo example.
//!
//! A todo list is an ordered list of item texts. Duplicates and empty
//! strings are allowed; the core applies no validation.

use reflux_macros::Action;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// State of the todo list
///
/// `items` is shared, never mutated in place. A change produces a new `Vec`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Item texts in insertion order
    pub items: Arc<Vec<String>>,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding `items`
    #[must_use]
    pub fn from_items<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            items: Arc::new(items.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns the number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Actions accepted by the todo store
///
/// Serialized in the `{ "kind": "ADD_ITEM", "payload": { "text": "..." } }`
/// shape; a missing `text` deserializes as the empty string.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    /// Append `text` to the list
    AddItem {
        /// Item text, stored as-is
        #[serde(default)]
        text: String,
    },

    /// Remove the item at `index`
    RemoveItem {
        /// Zero-based position
        index: usize,
    },

    /// Remove every item
    ClearItems,
}

impl TodoAction {
    /// Shorthand for [`TodoAction::AddItem`]
    #[must_use]
    pub fn add_item(text: impl Into<String>) -> Self {
        Self::AddItem { text: text.into() }
    }
}
