//! # Reflux Testing
//!
//! Testing utilities and helpers for the Reflux architecture.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then builder for pure reducers
//! - Mock subscribers that record what a store notified them about
//! - Property-based testing strategies
//! - Tracing setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use reflux_testing::mocks::RecordingSubscriber;
//! use reflux_runtime::Store;
//!
//! #[test]
//! fn test_add_item_flow() {
//!     let store = Arc::new(Store::new(TodoReducer));
//!     let recorder = RecordingSubscriber::attach(&store);
//!
//!     store.dispatch(TodoAction::AddItem { text: "milk".into() }).unwrap();
//!
//!     assert_eq!(recorder.count(), 1);
//!     assert_eq!(recorder.last().unwrap().items.as_slice(), ["milk"]);
//! }
//! ```


/// Mock subscribers
pub mod mocks {
    use reflux_core::{action::Action, reducer::Reducer};
    use reflux_runtime::{Store, Subscription};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Subscriber that records the state it reads on every notification
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Arc::new(Store::new(TodoReducer));
    /// let recorder = RecordingSubscriber::attach(&store);
    /// store.dispatch(TodoAction::AddItem { text: "a".into() })?;
    /// assert_eq!(recorder.count(), 1);
    /// ```
    #[derive(Debug)]
    pub struct RecordingSubscriber<S> {
        states: Arc<Mutex<Vec<Arc<S>>>>,
        subscription: Subscription,
    }

    impl<S> RecordingSubscriber<S>
    where
        S: Send + Sync + 'static,
    {
        /// Subscribe a new recorder to `store`
        ///
        /// The recorder holds a weak reference to the store.
        #[must_use]
        pub fn attach<R>(store: &Arc<Store<R>>) -> Self
        where
            R: Reducer<State = S> + Send + Sync + 'static,
            R::Action: Action,
        {
            let states = Arc::new(Mutex::new(Vec::new()));
            let weak = Arc::downgrade(store);
            let sink = Arc::clone(&states);

            let subscription = store.subscribe(move || {
                if let Some(store) = weak.upgrade() {
                    sink.lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(store.get_state());
                }
            });

            Self {
                states,
                subscription,
            }
        }

        /// Number of notifications received
        #[must_use]
        pub fn count(&self) -> usize {
            self.states
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }

        /// Every state observed, oldest first
        #[must_use]
        pub fn states(&self) -> Vec<Arc<S>> {
            self.states
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Most recently observed state
        #[must_use]
        pub fn last(&self) -> Option<Arc<S>> {
            self.states
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .last()
                .cloned()
        }

        /// Unsubscribe from the store
        ///
        /// Returns `true` if the recorder was still subscribed.
        #[allow(clippy::must_use_candidate)]
        pub fn detach(&self) -> bool {
            self.subscription.unsubscribe()
        }
    }

    /// Counts how many times its callbacks were invoked
    ///
    /// # Example
    ///
    /// ```
    /// use reflux_testing::mocks::CallCounter;
    ///
    /// let counter = CallCounter::new();
    /// let callback = counter.callback();
    /// callback();
    /// callback();
    /// assert_eq!(counter.count(), 2);
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct CallCounter {
        calls: Arc<AtomicUsize>,
    }

    impl CallCounter {
        /// Create a counter at zero
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// A callback that increments this counter
        #[must_use]
        pub fn callback(&self) -> impl Fn() + Send + Sync + use<> {
            let calls = Arc::clone(&self.calls);
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        }

        /// Number of calls so far
        #[must_use]
        pub fn count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    use tracing_subscriber::EnvFilter;

    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Honors `RUST_LOG`; defaults to `reflux_runtime=debug`. Calling it from
    /// several tests is fine: only the first call installs anything.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("reflux_runtime=debug")),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::collection::vec;
    use proptest::prelude::*;

    /// Item texts, including empty and non-ASCII strings
    pub fn item_text() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            "[a-z ]{1,16}",
            any::<String>(),
        ]
    }

    /// Lists of item texts, duplicates allowed
    pub fn item_list() -> impl Strategy<Value = Vec<String>> {
        vec(item_text(), 0..16)
    }
}

// Re-export commonly used items
pub use mocks::{CallCounter, RecordingSubscriber};
pub use reducer_test::{assertions, ReducerTest};
