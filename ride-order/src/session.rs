//! A shared, store-backed ride order.
//!
//! `RideSession` is the handle both the main flow and the delay watcher use.
//! Every operation goes through the store, so concurrent callers never
//! interleave inside a read-check-write of the order's state.

use crate::config::RideConfig;
use crate::engine::LifecycleEngine;
use crate::environment::RideEnvironment;
use crate::error::RideError;
use crate::notice::Transition;
use crate::reducer::{Outcome, RideAction, RideLifecycleState, RideReducer};
use crate::types::{OrderId, Rating, RideEvent, RideOrder, RideState};
use crate::watcher;
use ride_lifecycle_runtime::{EffectHandle, Store, StoreConfig};
use std::time::Duration;
use tokio::sync::broadcast;

/// Store specialized for a single ride order
pub type RideStore = Store<RideLifecycleState, RideAction, RideEnvironment, RideReducer>;

/// Shared handle on one ride order
///
/// Cloning is cheap; clones drive the same order.
#[derive(Clone)]
pub struct RideSession {
    order_id: OrderId,
    store: RideStore,
}

impl RideSession {
    /// Open a session with default store settings
    #[must_use]
    pub fn new(order: RideOrder, env: RideEnvironment) -> Self {
        Self::with_store_config(order, env, StoreConfig::default())
    }

    /// Open a session using the store settings of `config`
    #[must_use]
    pub fn with_config(order: RideOrder, env: RideEnvironment, config: &RideConfig) -> Self {
        Self::with_store_config(order, env, config.store_config())
    }

    fn with_store_config(order: RideOrder, env: RideEnvironment, config: StoreConfig) -> Self {
        let order_id = order.id().clone();
        tracing::debug!(order_id = %order_id, "opening ride session");
        let store = Store::with_config(
            RideLifecycleState::new(order),
            RideReducer::new(),
            env,
            config,
        );
        Self { order_id, store }
    }

    /// Identifier of the order this session drives
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &RideStore {
        &self.store
    }

    /// Whether `event` would currently be accepted
    pub async fn can_transition(&self, event: RideEvent) -> bool {
        let engine: LifecycleEngine<'static> = LifecycleEngine::standard();
        self.store
            .state(|s| engine.can_transition(&s.order, event))
            .await
    }

    /// Apply `event` to the order
    ///
    /// # Errors
    ///
    /// - [`RideError::Transition`] when the current state does not accept `event`
    /// - [`RideError::Store`] when the session is closing
    pub async fn transition(&self, event: RideEvent) -> Result<Transition, RideError> {
        let (_handle, outcome) = self
            .store
            .send_and_observe(RideAction::Dispatch { event }, |s| s.last_outcome.clone())
            .await?;

        match outcome {
            Some(Outcome::Transitioned(transition)) => Ok(transition),
            Some(Outcome::Rejected(error)) => Err(error.into()),
            _ => Err(RideError::MissingOutcome("transition")),
        }
    }

    /// Submit a passenger rating
    ///
    /// # Errors
    ///
    /// - [`RideError::Rating`] when the order is not `Idle` or the value is
    ///   outside `1..=5`
    /// - [`RideError::Store`] when the session is closing
    pub async fn submit_rating(&self, rating: i32) -> Result<Rating, RideError> {
        let (_handle, outcome) = self
            .store
            .send_and_observe(RideAction::SubmitRating { rating }, |s| s.last_outcome.clone())
            .await?;

        match outcome {
            Some(Outcome::Rated(rating)) => Ok(rating),
            Some(Outcome::RatingRejected(error)) => Err(error.into()),
            _ => Err(RideError::MissingOutcome("submit_rating")),
        }
    }

    /// Schedule the delay watcher
    ///
    /// See [`watcher::watch_for_delay`].
    ///
    /// # Errors
    ///
    /// Returns [`RideError::Store`] when the session is closing.
    pub async fn watch_for_delay(&self, after: Duration) -> Result<Option<EffectHandle>, RideError> {
        Ok(watcher::watch_for_delay(&self.store, after).await?)
    }

    /// Current lifecycle state
    pub async fn state(&self) -> RideState {
        self.store.state(|s| s.order.state()).await
    }

    /// Copy of the order
    pub async fn snapshot(&self) -> RideOrder {
        self.store.state(|s| s.order.clone()).await
    }

    /// Every applied transition, oldest first
    pub async fn history(&self) -> Vec<Transition> {
        self.store.state(|s| s.history.clone()).await
    }

    /// Actions fed back by effects, such as the watcher's `DelayElapsed`
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RideAction> {
        self.store.subscribe_actions()
    }

    /// Stop accepting operations and wait for a pending watcher
    ///
    /// # Errors
    ///
    /// Returns [`RideError::Store`] if the watcher does not finish within the
    /// configured shutdown timeout.
    pub async fn close(&self) -> Result<(), RideError> {
        tracing::debug!(order_id = %self.order_id, "closing ride session");
        self.store
            .shutdown(self.store.default_shutdown_timeout())
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for RideSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RideSession")
            .field("order_id", &self.order_id)
            .field("pending_effects", &self.store.pending_effects())
            .finish_non_exhaustive()
    }
}
