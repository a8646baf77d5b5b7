//! Transition logging as a subscriber.
//!
//! Reducers stay free of I/O; anything that wants a trace of every state
//! change subscribes to the store instead.

use crate::{Store, Subscription};
use reflux_core::{action::Action, reducer::Reducer};
use std::fmt::Debug;
use std::sync::Arc;

/// Log the state after every dispatch at `INFO` level.
///
/// The subscriber holds only a weak reference, so it does not keep the
/// store alive.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(Store::new(TodoReducer));
/// let _logging = log_transitions(&store);
/// store.dispatch(TodoAction::AddItem { text: "buy groceries".into() })?;
/// // INFO store=store state=TodoState { items: ["buy groceries"] } State updated
/// ```
pub fn log_transitions<R>(store: &Arc<Store<R>>) -> Subscription
where
    R: Reducer + Send + Sync + 'static,
    R::State: Debug + Send + Sync,
    R::Action: Action,
{
    let weak = Arc::downgrade(store);

    store.subscribe(move || {
        let Some(store) = weak.upgrade() else {
            return;
        };
        let state = store.get_state();
        tracing::info!(store = %store.config().name, state = ?state, "State updated");
    })
}
