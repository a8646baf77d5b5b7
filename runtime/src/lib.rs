//! # Reflux Runtime
//!
//! Runtime implementation for the Reflux architecture.
//!
//! This crate provides the Store that owns application state and serializes
//! every state transition through a single synchronous `dispatch` entry point.
//!
//! ## Core Components
//!
//! - **Store**: Holds the current `Arc<State>`, runs the reducer, notifies subscribers
//! - **Subscription**: Handle returned by `subscribe`, used to unsubscribe
//! - **`StoreConfig`**: Naming and notification behaviour
//!
//! ## Example
//!
//! ```ignore
//! use reflux_runtime::Store;
//!
//! let store = Store::new(TodoReducer);
//!
//! let _subscription = store.subscribe(|| println!("state changed"));
//!
//! store.dispatch(TodoAction::AddItem { text: "buy groceries".into() })?;
//!
//! let items = store.state(|s| s.items.len());
//! ```

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Prometheus metrics for observability
pub mod metrics;

/// Subscribers that log state transitions
pub mod logging;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// A store was built without a reducer
        ///
        /// This is a precondition violation in the calling code, not a
        /// condition to recover from.
        #[error("Store cannot be built without a reducer")]
        MissingReducer,

        /// `dispatch` was called while another dispatch was in progress
        ///
        /// Returned when a reducer or a subscriber dispatches into the same
        /// store, or when two threads dispatch without external
        /// synchronization. The in-progress dispatch is unaffected.
        #[error("Cannot dispatch {kind} while another dispatch is in progress")]
        ReentrantDispatch {
            /// Kind of the rejected action
            kind: &'static str,
        },
    }
}

pub use error::StoreError;

/// Configuration for Store behavior
///
/// # Example
///
/// ```
/// use reflux_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_name("todos")
///     .with_notify_on_passthrough(false);
///
/// assert_eq!(config.name, "todos");
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Label used in tracing spans and metric labels
    pub name: Cow<'static, str>,
    /// Notify subscribers when the reducer returned the identical state
    pub notify_on_passthrough: bool,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(name: Cow<'static, str>, notify_on_passthrough: bool) -> Self {
        Self {
            name,
            notify_on_passthrough,
        }
    }

    /// Set the store name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Set whether identity passthroughs notify subscribers
    #[must_use]
    pub const fn with_notify_on_passthrough(mut self, notify: bool) -> Self {
        self.notify_on_passthrough = notify;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("store"),
            notify_on_passthrough: true,
        }
    }
}

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Registered subscribers in registration order
#[derive(Default)]
struct SubscriberList {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

impl SubscriberList {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a registered subscriber
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
#[must_use = "dropping a Subscription keeps the callback registered; keep it to unsubscribe later"]
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    subscribers: Weak<Mutex<SubscriberList>>,
}

impl Subscription {
    /// Remove the callback from its store
    ///
    /// Returns `true` if the callback was still registered. Unsubscribing
    /// twice, or after the store was dropped, returns `false`.
    #[allow(clippy::must_use_candidate)]
    pub fn unsubscribe(&self) -> bool {
        let Some(subscribers) = self.subscribers.upgrade() else {
            return false;
        };

        let mut list = lock(&subscribers);
        let before = list.entries.len();
        list.entries.retain(|(id, _)| *id != self.id);
        let removed = list.entries.len() != before;

        if removed {
            // Note: Precision loss acceptable for metrics (subscriber counts < 2^52)
            #[allow(clippy::cast_precision_loss)]
            ::metrics::gauge!(crate::metrics::SUBSCRIBERS_ACTIVE).set(list.entries.len() as f64);
            tracing::trace!(subscription = self.id, "Subscriber removed");
        }

        removed
    }

    /// Returns true while the callback is registered
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.subscribers
            .upgrade()
            .is_some_and(|subscribers| lock(&subscribers).contains(self.id))
    }
}

/// Internal: RAII guard that clears the dispatch flag on drop
///
/// Ensures the flag is always released, even if the reducer or a subscriber panics.
struct DispatchGuard<'a>(&'a AtomicBool);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        lock, Arc, AtomicBool, DispatchGuard, Listener, Mutex, Ordering, StoreConfig,
        StoreError, SubscriberList, Subscription,
    };
    use reflux_core::{action::Action, reducer::Reducer};

    /// The Store - single authoritative holder of application state
    ///
    /// The Store manages:
    /// 1. State (an `Arc<State>` replaced wholesale on every dispatch)
    /// 2. Reducer (business logic)
    /// 3. Subscribers (notified after every committed dispatch)
    ///
    /// # Concurrency
    ///
    /// `dispatch` runs synchronously on the calling thread: the reducer and
    /// every subscriber complete before it returns. The store is `Send + Sync`
    /// when its reducer and state are, so it can be shared as an `Arc<Store>`,
    /// but it does not queue dispatches. Hosts dispatching from several
    /// threads must serialize the calls themselves; overlapping calls are
    /// rejected with [`StoreError::ReentrantDispatch`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Arc::new(Store::new(TodoReducer));
    ///
    /// let weak = Arc::downgrade(&store);
    /// let subscription = store.subscribe(move || {
    ///     if let Some(store) = weak.upgrade() {
    ///         println!("{} items", store.get_state().items.len());
    ///     }
    /// });
    ///
    /// store.dispatch(TodoAction::AddItem { text: "buy groceries".into() })?;
    /// subscription.unsubscribe();
    /// ```
    pub struct Store<R>
    where
        R: Reducer,
    {
        reducer: R,
        state: Mutex<Arc<R::State>>,
        subscribers: Arc<Mutex<SubscriberList>>,
        dispatching: AtomicBool,
        config: StoreConfig,
    }

    impl<R> Store<R>
    where
        R: Reducer,
        R::Action: Action,
    {
        /// Create a new store whose initial state comes from [`Reducer::init`]
        #[must_use]
        pub fn new(reducer: R) -> Self {
            let initial_state = reducer.init();
            Self::with_config(reducer, initial_state, StoreConfig::default())
        }

        /// Create a new store with an explicit initial state
        #[must_use]
        pub fn with_state(reducer: R, initial_state: R::State) -> Self {
            Self::with_config(reducer, initial_state, StoreConfig::default())
        }

        /// Create a new store with an explicit initial state and configuration
        #[must_use]
        pub fn with_config(reducer: R, initial_state: R::State, config: StoreConfig) -> Self {
            tracing::debug!(store = %config.name, "Store created");

            Self {
                reducer,
                state: Mutex::new(Arc::new(initial_state)),
                subscribers: Arc::new(Mutex::new(SubscriberList::default())),
                dispatching: AtomicBool::new(false),
                config,
            }
        }

        /// Start building a store
        ///
        /// See [`StoreBuilder`].
        #[must_use]
        pub fn builder() -> StoreBuilder<R> {
            StoreBuilder::new()
        }

        /// The configuration this store was built with
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Dispatch an action to the store
        ///
        /// This is the only way to change state:
        /// 1. Calls the reducer with (current state, action)
        /// 2. Replaces the current state with the result
        /// 3. Invokes every subscriber in registration order
        ///
        /// # Returns
        ///
        /// The dispatched action, unchanged.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ReentrantDispatch`] if called while another
        /// dispatch on this store is running (from inside the reducer, from a
        /// subscriber, or concurrently from another thread). State is left
        /// exactly as it was before the rejected call.
        ///
        /// # Panics
        ///
        /// A panic in the reducer propagates and leaves state unchanged. A
        /// panic in a subscriber propagates after state was committed.
        #[tracing::instrument(skip(self, action), fields(store = %self.config.name), name = "store_dispatch")]
        pub fn dispatch(&self, action: R::Action) -> Result<R::Action, StoreError> {
            let kind = action.kind();

            if self
                .dispatching
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                tracing::warn!(kind, "Rejected re-entrant dispatch");
                ::metrics::counter!(crate::metrics::DISPATCH_REJECTED, "store" => self.config.name.to_string())
                    .increment(1);
                return Err(StoreError::ReentrantDispatch { kind });
            }
            let _guard = DispatchGuard(&self.dispatching);

            tracing::debug!(kind, "Processing action");
            ::metrics::counter!(crate::metrics::DISPATCH_TOTAL, "store" => self.config.name.to_string())
                .increment(1);

            let current = self.get_state();

            let next = {
                let span = tracing::debug_span!("reducer_execution", kind);
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let next = self.reducer.reduce(&current, &action);
                ::metrics::histogram!(crate::metrics::REDUCER_DURATION)
                    .record(start.elapsed().as_secs_f64());

                next
            };

            let changed = !Arc::ptr_eq(&current, &next);
            *lock(&self.state) = next;
            tracing::trace!(changed, "State committed");

            if changed || self.config.notify_on_passthrough {
                self.notify();
            }

            Ok(action)
        }

        /// Current state
        ///
        /// Returns the same `Arc` (pointer-equal) on every call until a
        /// dispatch replaces it. Treat it as read-only.
        #[must_use]
        pub fn get_state(&self) -> Arc<R::State> {
            Arc::clone(&lock(&self.state))
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.items.len());
        /// ```
        ///
        /// The internal lock is released before `f` runs, so `f` may use the
        /// store freely.
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&R::State) -> T,
        {
            let state = self.get_state();
            f(&state)
        }

        /// Register a callback invoked after every dispatch
        ///
        /// The callback receives no arguments; it reads [`Store::get_state`]
        /// itself if it needs the new state. A callback registered while a
        /// dispatch is notifying subscribers is first invoked on the next
        /// dispatch.
        pub fn subscribe<F>(&self, callback: F) -> Subscription
        where
            F: Fn() + Send + Sync + 'static,
        {
            let mut list = lock(&self.subscribers);
            let id = list.next_id;
            list.next_id += 1;
            list.entries.push((id, Arc::new(callback)));

            // Note: Precision loss acceptable for metrics (subscriber counts < 2^52)
            #[allow(clippy::cast_precision_loss)]
            ::metrics::gauge!(crate::metrics::SUBSCRIBERS_ACTIVE).set(list.entries.len() as f64);
            tracing::trace!(subscription = id, "Subscriber added");

            Subscription {
                id,
                subscribers: Arc::downgrade(&self.subscribers),
            }
        }

        /// Number of registered subscribers
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            lock(&self.subscribers).entries.len()
        }

        /// Returns true while a dispatch is running
        #[must_use]
        pub fn is_dispatching(&self) -> bool {
            self.dispatching.load(Ordering::Acquire)
        }

        /// Invoke subscribers registered before this pass started
        ///
        /// The list lock is never held while a callback runs, so callbacks may
        /// subscribe or unsubscribe.
        fn notify(&self) {
            let snapshot: Vec<(u64, Listener)> = lock(&self.subscribers).entries.clone();
            let mut notified: u64 = 0;

            for (id, listener) in snapshot {
                // Skip callbacks unsubscribed earlier in this pass
                if !lock(&self.subscribers).contains(id) {
                    continue;
                }
                listener();
                notified += 1;
            }

            tracing::trace!(notified, "Subscribers notified");
            ::metrics::counter!(crate::metrics::SUBSCRIBERS_NOTIFIED).increment(notified);
        }
    }

    impl<R> std::fmt::Debug for Store<R>
    where
        R: Reducer,
        R::State: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let state = Arc::clone(&lock(&self.state));
            f.debug_struct("Store")
                .field("name", &self.config.name)
                .field("state", &state)
                .field("subscribers", &lock(&self.subscribers).entries.len())
                .field("dispatching", &self.dispatching.load(Ordering::Acquire))
                .finish_non_exhaustive()
        }
    }

    /// Builder for [`Store`]
    ///
    /// The reducer is required; the initial state and configuration are not.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::builder()
    ///     .reducer(TodoReducer)
    ///     .initial_state(TodoState::default())
    ///     .config(StoreConfig::default().with_name("todos"))
    ///     .build()?;
    /// ```
    pub struct StoreBuilder<R>
    where
        R: Reducer,
    {
        reducer: Option<R>,
        initial_state: Option<R::State>,
        config: StoreConfig,
    }

    impl<R> StoreBuilder<R>
    where
        R: Reducer,
        R::Action: Action,
    {
        /// Create an empty builder
        #[must_use]
        pub fn new() -> Self {
            Self {
                reducer: None,
                initial_state: None,
                config: StoreConfig::default(),
            }
        }

        /// Set the reducer
        #[must_use]
        pub fn reducer(mut self, reducer: R) -> Self {
            self.reducer = Some(reducer);
            self
        }

        /// Set the initial state
        ///
        /// Without it, the store asks the reducer via [`Reducer::init`].
        #[must_use]
        pub fn initial_state(mut self, state: R::State) -> Self {
            self.initial_state = Some(state);
            self
        }

        /// Set the configuration
        #[must_use]
        pub fn config(mut self, config: StoreConfig) -> Self {
            self.config = config;
            self
        }

        /// Build the store
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::MissingReducer`] if no reducer was set.
        pub fn build(self) -> Result<Store<R>, StoreError> {
            let Some(reducer) = self.reducer else {
                tracing::error!(store = %self.config.name, "Store built without a reducer");
                return Err(StoreError::MissingReducer);
            };

            let initial_state = match self.initial_state {
                Some(state) => state,
                None => reducer.init(),
            };

            Ok(Store::with_config(reducer, initial_state, self.config))
        }
    }

    impl<R> Default for StoreBuilder<R>
    where
        R: Reducer,
        R::Action: Action,
    {
        fn default() -> Self {
            Self::new()
        }
    }
}

pub use store::{Store, StoreBuilder};
