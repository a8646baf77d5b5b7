//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on a subset of state
//!
//! Both preserve the identity passthrough contract: when none of the
//! composed reducers changes anything, the input `Arc` is returned as-is.
//!
//! # Examples
//!
//! ## Combining Reducers
//!
//! ```
//! use std::sync::Arc;
//! use reflux_core::Reducer;
//! use reflux_core::composition::combine_reducers;
//!
//! #[derive(Clone, Default)]
//! struct MyState {
//!     count: i32,
//!     name: String,
//! }
//!
//! enum MyAction {
//!     Increment,
//!     SetName(String),
//! }
//!
//! struct CounterReducer;
//! struct NameReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = MyState;
//!     type Action = MyAction;
//!
//!     fn init(&self) -> MyState {
//!         MyState::default()
//!     }
//!
//!     fn reduce(&self, state: &Arc<MyState>, action: &MyAction) -> Arc<MyState> {
//!         match action {
//!             MyAction::Increment => Arc::new(MyState { count: state.count + 1, ..MyState::clone(state) }),
//!             MyAction::SetName(_) => Arc::clone(state),
//!         }
//!     }
//! }
//!
//! impl Reducer for NameReducer {
//!     type State = MyState;
//!     type Action = MyAction;
//!
//!     fn init(&self) -> MyState {
//!         MyState::default()
//!     }
//!
//!     fn reduce(&self, state: &Arc<MyState>, action: &MyAction) -> Arc<MyState> {
//!         match action {
//!             MyAction::SetName(name) => Arc::new(MyState { name: name.clone(), ..MyState::clone(state) }),
//!             MyAction::Increment => Arc::clone(state),
//!         }
//!     }
//! }
//!
//! let combined = combine_reducers(vec![Box::new(CounterReducer), Box::new(NameReducer)]);
//! let state = Arc::new(combined.init());
//! let state = combined.reduce(&state, &MyAction::Increment);
//! let state = combined.reduce(&state, &MyAction::SetName("Alice".into()));
//! assert_eq!(state.count, 1);
//! assert_eq!(state.name, "Alice");
//! ```

use crate::reducer::Reducer;
use std::sync::Arc;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence, and each one sees the state produced by
/// the previous one. The initial state is `S::default()`.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type
#[must_use]
pub fn combine_reducers<S, A>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A>>>,
) -> CombinedReducer<S, A>
where
    S: Default + 'static,
    A: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A>
where
    S: 'static,
    A: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A>>>,
}

impl<S, A> CombinedReducer<S, A>
where
    S: 'static,
    A: 'static,
{
    /// Number of reducers in this combination
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Returns true if no reducers were combined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A> Reducer for CombinedReducer<S, A>
where
    S: Default + 'static,
    A: 'static,
{
    type State = S;
    type Action = A;

    fn init(&self) -> S {
        S::default()
    }

    fn reduce(&self, state: &Arc<S>, action: &A) -> Arc<S> {
        self.reducers
            .iter()
            .fold(Arc::clone(state), |current, reducer| {
                reducer.reduce(&current, action)
            })
    }
}

/// Scopes a reducer to operate on a subset of a larger state.
///
/// The child state lives in the parent as an `Arc<SubS>` field. When the
/// child reducer passes its state through, the parent is passed through too;
/// otherwise `set_state` builds a new parent around the new child.
///
/// # Type Parameters
///
/// - `S`: The parent state type
/// - `SubS`: The child state type (subset of `S`)
/// - `A`: The action type
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use reflux_core::Reducer;
/// use reflux_core::composition::scope_reducer;
///
/// #[derive(Clone, Default)]
/// struct CounterState {
///     count: i32,
/// }
///
/// enum CounterAction {
///     Increment,
///     Noop,
/// }
///
/// struct CounterReducer;
///
/// impl Reducer for CounterReducer {
///     type State = CounterState;
///     type Action = CounterAction;
///
///     fn init(&self) -> CounterState {
///         CounterState::default()
///     }
///
///     fn reduce(&self, state: &Arc<CounterState>, action: &CounterAction) -> Arc<CounterState> {
///         match action {
///             CounterAction::Increment => Arc::new(CounterState { count: state.count + 1 }),
///             CounterAction::Noop => Arc::clone(state),
///         }
///     }
/// }
///
/// #[derive(Clone, Default)]
/// struct AppState {
///     counter: Arc<CounterState>,
///     title: String,
/// }
///
/// let scoped = scope_reducer(
///     CounterReducer,
///     |app: &AppState| &app.counter,
///     |app: &AppState, counter| AppState { counter, ..app.clone() },
/// );
///
/// let state = Arc::new(AppState::default());
/// let next = scoped.reduce(&state, &CounterAction::Increment);
/// assert_eq!(next.counter.count, 1);
/// assert!(Arc::ptr_eq(&next, &scoped.reduce(&next, &CounterAction::Noop)));
/// ```
pub fn scope_reducer<S, SubS, A, R>(
    reducer: R,
    get_state: fn(&S) -> &Arc<SubS>,
    set_state: fn(&S, Arc<SubS>) -> S,
) -> ScopedReducer<S, SubS, A, R>
where
    S: Default + 'static,
    SubS: 'static,
    A: 'static,
    R: Reducer<State = SubS, Action = A>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, R>
where
    S: 'static,
    SubS: 'static,
    A: 'static,
    R: Reducer<State = SubS, Action = A>,
{
    reducer: R,
    get_state: fn(&S) -> &Arc<SubS>,
    set_state: fn(&S, Arc<SubS>) -> S,
}

impl<S, SubS, A, R> Reducer for ScopedReducer<S, SubS, A, R>
where
    S: Default + 'static,
    SubS: 'static,
    A: 'static,
    R: Reducer<State = SubS, Action = A>,
{
    type State = S;
    type Action = A;

    fn init(&self) -> S {
        let parent = S::default();
        let child = Arc::new(self.reducer.init());
        (self.set_state)(&parent, child)
    }

    fn reduce(&self, state: &Arc<S>, action: &A) -> Arc<S> {
        let current = (self.get_state)(state);
        let next = self.reducer.reduce(current, action);

        if Arc::ptr_eq(current, &next) {
            return Arc::clone(state);
        }

        Arc::new((self.set_state)(state, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct TestState {
        counter: i32,
        name: String,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Decrement,
        SetName(String),
        Ignored,
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = TestState;
        type Action = TestAction;

        fn init(&self) -> TestState {
            TestState::default()
        }

        fn reduce(&self, state: &Arc<TestState>, action: &TestAction) -> Arc<TestState> {
            match action {
                TestAction::Increment => Arc::new(TestState {
                    counter: state.counter + 1,
                    ..TestState::clone(state)
                }),
                TestAction::Decrement => Arc::new(TestState {
                    counter: state.counter - 1,
                    ..TestState::clone(state)
                }),
                TestAction::SetName(_) | TestAction::Ignored => Arc::clone(state),
            }
        }
    }

    struct NameReducer;

    impl Reducer for NameReducer {
        type State = TestState;
        type Action = TestAction;

        fn init(&self) -> TestState {
            TestState::default()
        }

        fn reduce(&self, state: &Arc<TestState>, action: &TestAction) -> Arc<TestState> {
            if let TestAction::SetName(name) = action {
                return Arc::new(TestState {
                    name: name.clone(),
                    ..TestState::clone(state)
                });
            }
            Arc::clone(state)
        }
    }

    fn combined() -> CombinedReducer<TestState, TestAction> {
        combine_reducers(vec![Box::new(CounterReducer), Box::new(NameReducer)])
    }

    #[test]
    fn test_combine_reducers() {
        let combined = combined();
        assert_eq!(combined.len(), 2);

        let state = Arc::new(combined.init());

        let state = combined.reduce(&state, &TestAction::Increment);
        assert_eq!(state.counter, 1);

        let state = combined.reduce(&state, &TestAction::SetName("Alice".to_string()));
        assert_eq!(state.name, "Alice");

        let state = combined.reduce(&state, &TestAction::Decrement);
        assert_eq!(state.counter, 0);
        assert_eq!(state.name, "Alice");
    }

    #[test]
    fn test_combined_passthrough_keeps_identity() {
        let combined = combined();
        let state = Arc::new(TestState {
            counter: 3,
            name: "Bob".to_string(),
        });

        let next = combined.reduce(&state, &TestAction::Ignored);
        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn test_empty_combination_is_identity() {
        let combined: CombinedReducer<TestState, TestAction> = combine_reducers(Vec::new());
        assert!(combined.is_empty());

        let state = Arc::new(TestState::default());
        assert!(Arc::ptr_eq(&state, &combined.reduce(&state, &TestAction::Increment)));
    }

    // Scoped reducer tests
    #[derive(Clone, Debug, Default, PartialEq)]
    struct SubState {
        value: i32,
    }

    enum SubAction {
        Add(i32),
        Multiply(i32),
    }

    struct SubReducer;

    impl Reducer for SubReducer {
        type State = SubState;
        type Action = SubAction;

        fn init(&self) -> SubState {
            SubState { value: 1 }
        }

        fn reduce(&self, state: &Arc<SubState>, action: &SubAction) -> Arc<SubState> {
            match action {
                SubAction::Add(0) | SubAction::Multiply(1) => Arc::clone(state),
                SubAction::Add(n) => Arc::new(SubState {
                    value: state.value + n,
                }),
                SubAction::Multiply(n) => Arc::new(SubState {
                    value: state.value * n,
                }),
            }
        }
    }

    #[derive(Clone, Debug, Default)]
    struct ParentState {
        sub: Arc<SubState>,
        other: Arc<String>,
    }

    fn scoped() -> ScopedReducer<ParentState, SubState, SubAction, SubReducer> {
        scope_reducer(
            SubReducer,
            |parent: &ParentState| &parent.sub,
            |parent: &ParentState, sub: Arc<SubState>| ParentState {
                sub,
                other: Arc::clone(&parent.other),
            },
        )
    }

    #[test]
    fn test_scope_reducer() {
        let scoped = scoped();
        let state = Arc::new(ParentState {
            sub: Arc::new(SubState { value: 5 }),
            other: Arc::new("test".to_string()),
        });

        let next = scoped.reduce(&state, &SubAction::Add(3));
        assert_eq!(next.sub.value, 8);
        assert_eq!(*next.other, "test");
        assert!(Arc::ptr_eq(&state.other, &next.other));

        let next = scoped.reduce(&next, &SubAction::Multiply(2));
        assert_eq!(next.sub.value, 16);

        // Original untouched
        assert_eq!(state.sub.value, 5);
    }

    #[test]
    fn test_scope_reducer_init_uses_child_init() {
        assert_eq!(scoped().init().sub.value, 1);
    }

    #[test]
    fn test_scope_reducer_passthrough_keeps_parent_identity() {
        let scoped = scoped();
        let state = Arc::new(ParentState::default());
        assert!(Arc::ptr_eq(&state, &scoped.reduce(&state, &SubAction::Add(0))));
    }

    proptest! {
        #[test]
        fn prop_combined_matches_sequential_application(
            ops in proptest::collection::vec(0u8..4, 0..32),
        ) {
            let combined = combined();
            let mut expected = TestState::default();
            let mut state = Arc::new(TestState::default());

            for op in ops {
                let action = match op {
                    0 => TestAction::Increment,
                    1 => TestAction::Decrement,
                    2 => TestAction::SetName(format!("n{}", expected.counter)),
                    _ => TestAction::Ignored,
                };
                match &action {
                    TestAction::Increment => expected.counter += 1,
                    TestAction::Decrement => expected.counter -= 1,
                    TestAction::SetName(name) => expected.name.clone_from(name),
                    TestAction::Ignored => {}
                }
                state = combined.reduce(&state, &action);
            }

            prop_assert_eq!(&*state, &expected);
        }
    }
}
