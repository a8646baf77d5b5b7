//! # Reflux Core
//!
//! Core traits and types for the Reflux architecture.
//!
//! This crate provides the fundamental abstractions for building applications
//! around a single, synchronously updated state value:
//!
//! - **State**: An immutable record, always handled as `Arc<State>`
//! - **Action**: A tagged union describing an intent to change state
//! - **Reducer**: Pure function `(State, Action) → State`
//!
//! The runtime side (the `Store` that owns the state and serializes
//! dispatches) lives in `reflux-runtime`.
//!
//! ## Architecture Principles
//!
//! - Unidirectional data flow
//! - Reducers never mutate their input and never perform I/O
//! - Unhandled actions pass the state through by identity
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use reflux_core::{Action, Reducer};
//!
//! #[derive(Clone, Debug, Default)]
//! struct ListState {
//!     items: Arc<Vec<String>>,
//! }
//!
//! enum ListAction {
//!     AddItem { text: String },
//!     Refresh,
//! }
//!
//! impl Action for ListAction {
//!     fn kind(&self) -> &'static str {
//!         match self {
//!             Self::AddItem { .. } => "ADD_ITEM",
//!             Self::Refresh => "REFRESH",
//!         }
//!     }
//! }
//!
//! struct ListReducer;
//!
//! impl Reducer for ListReducer {
//!     type State = ListState;
//!     type Action = ListAction;
//!
//!     fn init(&self) -> ListState {
//!         ListState::default()
//!     }
//!
//!     fn reduce(&self, state: &Arc<ListState>, action: &ListAction) -> Arc<ListState> {
//!         match action {
//!             ListAction::AddItem { text } => {
//!                 let mut items = state.items.to_vec();
//!                 items.push(text.clone());
//!                 Arc::new(ListState { items: Arc::new(items) })
//!             }
//!             ListAction::Refresh => Arc::clone(state),
//!         }
//!     }
//! }
//!
//! let state = Arc::new(ListReducer.init());
//! let next = ListReducer.reduce(&state, &ListAction::AddItem { text: "milk".into() });
//! assert_eq!(next.items.as_slice(), ["milk"]);
//! assert!(Arc::ptr_eq(&next, &ListReducer.reduce(&next, &ListAction::Refresh)));
//! ```

// Re-export commonly used types
pub use serde::{Deserialize, Serialize};

/// Reducer composition utilities
pub mod composition;

/// Action module - the tagged inputs a reducer folds into state
///
/// Actions are plain Rust enums. The only thing the runtime needs from them
/// is a stable, human-readable discriminator for logs and metrics, which is
/// what [`Action::kind`](action::Action::kind) provides.
pub mod action {
    /// An intent to change state, tagged with a kind.
    ///
    /// Usually derived with `#[derive(Action)]` from `reflux-macros`, which
    /// maps each variant to its `SCREAMING_SNAKE_CASE` name
    /// (`AddItem` → `"ADD_ITEM"`).
    pub trait Action {
        /// The discriminator of this action, e.g. `"ADD_ITEM"`
        fn kind(&self) -> &'static str;
    }

    impl<A: Action + ?Sized> Action for &A {
        fn kind(&self) -> &'static str {
            (**self).kind()
        }
    }
}

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action) → State`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use std::marker::PhantomData;
    use std::sync::Arc;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    ///
    /// # Contract
    ///
    /// - `reduce` must never mutate `state`. A changed field is a new
    ///   container; untouched fields may be shared with the input.
    /// - For an action the reducer does not handle, `reduce` returns
    ///   `Arc::clone(state)` so callers can detect "no change" with
    ///   [`Arc::ptr_eq`].
    /// - `reduce` keeps no reference to `state` between calls.
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for TodoReducer {
    ///     type State = TodoState;
    ///     type Action = TodoAction;
    ///
    ///     fn init(&self) -> TodoState {
    ///         TodoState::default()
    ///     }
    ///
    ///     fn reduce(&self, state: &Arc<TodoState>, action: &TodoAction) -> Arc<TodoState> {
    ///         match action {
    ///             TodoAction::AddItem { text } => Arc::new(state.with_item(text)),
    ///             TodoAction::Ignored => Arc::clone(state),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The default shape of the state
        ///
        /// A store built without an explicit initial state asks the reducer
        /// for this value once, at construction time.
        fn init(&self) -> Self::State;

        /// Reduce an action into the next state
        ///
        /// # Arguments
        ///
        /// - `state`: The current state (read-only)
        /// - `action`: The action to process
        ///
        /// # Returns
        ///
        /// The next state, or `state` itself when nothing changed
        fn reduce(&self, state: &Arc<Self::State>, action: &Self::Action) -> Arc<Self::State>;
    }

    impl<R: Reducer + ?Sized> Reducer for Box<R> {
        type State = R::State;
        type Action = R::Action;

        fn init(&self) -> Self::State {
            (**self).init()
        }

        fn reduce(&self, state: &Arc<Self::State>, action: &Self::Action) -> Arc<Self::State> {
            (**self).reduce(state, action)
        }
    }

    impl<R: Reducer + ?Sized> Reducer for Arc<R> {
        type State = R::State;
        type Action = R::Action;

        fn init(&self) -> Self::State {
            (**self).init()
        }

        fn reduce(&self, state: &Arc<Self::State>, action: &Self::Action) -> Arc<Self::State> {
            (**self).reduce(state, action)
        }
    }

    /// Wraps a closure as a [`Reducer`].
    ///
    /// The initial state is `S::default()`.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use reflux_core::reducer::{reducer_fn, Reducer};
    ///
    /// let counter = reducer_fn(|state: &Arc<i64>, delta: &i64| {
    ///     if *delta == 0 { Arc::clone(state) } else { Arc::new(**state + delta) }
    /// });
    ///
    /// let state = Arc::new(counter.init());
    /// assert_eq!(*counter.reduce(&state, &3), 3);
    /// ```
    pub const fn reducer_fn<S, A, F>(f: F) -> FnReducer<S, A, F>
    where
        S: Default,
        F: Fn(&Arc<S>, &A) -> Arc<S>,
    {
        FnReducer {
            f,
            _phantom: PhantomData,
        }
    }

    /// A reducer backed by a closure.
    ///
    /// Created by [`reducer_fn`].
    pub struct FnReducer<S, A, F> {
        f: F,
        _phantom: PhantomData<fn(&S, &A)>,
    }

    impl<S, A, F> Reducer for FnReducer<S, A, F>
    where
        S: Default,
        F: Fn(&Arc<S>, &A) -> Arc<S>,
    {
        type State = S;
        type Action = A;

        fn init(&self) -> S {
            S::default()
        }

        fn reduce(&self, state: &Arc<S>, action: &A) -> Arc<S> {
            (self.f)(state, action)
        }
    }
}

pub use action::Action;
pub use reducer::Reducer;

#[cfg(test)]
mod tests {
    use super::reducer::{reducer_fn, Reducer};
    use super::Action;
    use std::sync::Arc;

    enum Toggle {
        Flip,
        Keep,
    }

    impl Action for Toggle {
        fn kind(&self) -> &'static str {
            match self {
                Self::Flip => "FLIP",
                Self::Keep => "KEEP",
            }
        }
    }

    fn toggle_reducer() -> impl Reducer<State = bool, Action = Toggle> {
        reducer_fn(|state: &Arc<bool>, action: &Toggle| match action {
            Toggle::Flip => Arc::new(!**state),
            Toggle::Keep => Arc::clone(state),
        })
    }

    #[test]
    fn test_fn_reducer_init_uses_default() {
        assert!(!toggle_reducer().init());
    }

    #[test]
    fn test_fn_reducer_changes_state() {
        let reducer = toggle_reducer();
        let state = Arc::new(reducer.init());
        let next = reducer.reduce(&state, &Toggle::Flip);
        assert!(*next);
        assert!(!*state);
    }

    #[test]
    fn test_fn_reducer_passthrough_is_identity() {
        let reducer = toggle_reducer();
        let state = Arc::new(true);
        assert!(Arc::ptr_eq(&state, &reducer.reduce(&state, &Toggle::Keep)));
    }

    #[test]
    fn test_boxed_reducer_delegates() {
        let boxed: Box<dyn Reducer<State = bool, Action = Toggle>> = Box::new(toggle_reducer());
        let state = Arc::new(boxed.init());
        assert!(*boxed.reduce(&state, &Toggle::Flip));
    }

    #[test]
    fn test_action_kind_through_reference() {
        let action = Toggle::Flip;
        let by_ref = &action;
        assert_eq!(Action::kind(&by_ref), "FLIP");
        assert_eq!(Toggle::Keep.kind(), "KEEP");
    }
}
