//! Delay watcher scheduling.
//!
//! The watcher is a delayed store effect. Whether it is armed is decided
//! under the store lock from the order's state at scheduling time; when it
//! fires, `CarDelayed` goes through the normal transition path against the
//! live state, so a ride that already advanced simply rejects it.

use crate::reducer::{Outcome, RideAction};
use crate::session::RideStore;
use ride_lifecycle_runtime::{EffectHandle, StoreError};
use std::time::Duration;

/// Schedule a delay watcher on the store-backed order
///
/// Returns the handle of the armed watcher, or `None` when the order was not
/// `OrderConfirmed` or a watcher is already pending. Waiting on the handle
/// completes once the watcher's `CarDelayed` submission has been reduced.
///
/// # Errors
///
/// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
pub async fn watch_for_delay(
    store: &RideStore,
    after: Duration,
) -> Result<Option<EffectHandle>, StoreError> {
    let (handle, armed) = store
        .send_and_observe(RideAction::WatchForDelay { after }, |state| {
            matches!(state.last_outcome, Some(Outcome::WatchArmed { .. }))
        })
        .await?;

    Ok(armed.then_some(handle))
}
