//! Store-backed ride lifecycle.
//!
//! The reducer runs under the store's write lock, so every engine call it
//! makes is a single atomic read-check-write of the order. Typed results are
//! left in `last_outcome` for the caller to read under that same lock.

use crate::engine::LifecycleEngine;
use crate::environment::RideEnvironment;
use crate::error::{InvalidTransition, RatingError};
use crate::notice::Transition;
use crate::types::{Rating, RideEvent, RideOrder, RideState};
use ride_lifecycle_core::{SmallVec, delay, effect::Effect, reducer::Reducer, smallvec};
use std::time::Duration;

/// Actions accepted by the [`RideReducer`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RideAction {
    /// Apply a lifecycle event
    Dispatch {
        /// Event to apply
        event: RideEvent,
    },
    /// Submit a passenger rating
    SubmitRating {
        /// Raw rating value, validated by the engine
        rating: i32,
    },
    /// Arm the delay watcher if the order is `OrderConfirmed`
    WatchForDelay {
        /// How long to wait before raising `CarDelayed`
        after: Duration,
    },
    /// The delay watcher's wait elapsed
    DelayElapsed,
}

/// Result of the most recent action
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// An event was applied
    Transitioned(Transition),
    /// An event was rejected
    Rejected(InvalidTransition),
    /// A rating was stored
    Rated(Rating),
    /// A rating was refused
    RatingRejected(RatingError),
    /// A delay watcher was scheduled
    WatchArmed {
        /// Scheduled wait
        after: Duration,
    },
    /// No watcher was scheduled because the order was not `OrderConfirmed`
    WatchSkipped {
        /// State at scheduling time
        state: RideState,
    },
    /// No watcher was scheduled because one is already pending
    WatchAlreadyPending,
}

/// State held by the store
#[derive(Clone, Debug)]
pub struct RideLifecycleState {
    /// The order
    pub order: RideOrder,
    /// Every applied transition, oldest first
    pub history: Vec<Transition>,
    /// Outcome of the last reduced action
    pub last_outcome: Option<Outcome>,
    /// Whether a delay watcher is scheduled and has not fired yet
    pub watch_pending: bool,
}

impl RideLifecycleState {
    /// Fresh state around `order`
    #[must_use]
    pub const fn new(order: RideOrder) -> Self {
        Self {
            order,
            history: Vec::new(),
            last_outcome: None,
            watch_pending: false,
        }
    }
}

/// Reducer driving a single ride order through the lifecycle engine
#[derive(Debug, Clone, Copy, Default)]
pub struct RideReducer {
    engine: LifecycleEngine<'static>,
}

impl RideReducer {
    /// Reducer over the standard transition table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The engine every action goes through
    #[must_use]
    pub const fn engine(&self) -> LifecycleEngine<'static> {
        self.engine
    }

    fn apply(&self, state: &mut RideLifecycleState, event: RideEvent, env: &RideEnvironment) {
        let outcome = match self.engine.transition(&mut state.order, event, env) {
            Ok(transition) => {
                state.history.push(transition.clone());
                Outcome::Transitioned(transition)
            },
            Err(error) => {
                tracing::debug!(order_id = %error.order_id, %error, "event not applied");
                Outcome::Rejected(error)
            },
        };
        state.last_outcome = Some(outcome);
    }
}

impl Reducer for RideReducer {
    type State = RideLifecycleState;
    type Action = RideAction;
    type Environment = RideEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            RideAction::Dispatch { event } => {
                self.apply(state, event, env);
                smallvec![Effect::None]
            },

            RideAction::SubmitRating { rating } => {
                let outcome = match self.engine.submit_rating(&mut state.order, rating, env) {
                    Ok(rating) => Outcome::Rated(rating),
                    Err(error) => Outcome::RatingRejected(error),
                };
                state.last_outcome = Some(outcome);
                smallvec![Effect::None]
            },

            RideAction::WatchForDelay { after } => {
                let current = state.order.state();
                if state.watch_pending {
                    state.last_outcome = Some(Outcome::WatchAlreadyPending);
                    return smallvec![Effect::None];
                }
                if current != RideState::OrderConfirmed {
                    tracing::debug!(
                        order_id = %state.order.id(),
                        state = %current,
                        "delay watcher not armed"
                    );
                    state.last_outcome = Some(Outcome::WatchSkipped { state: current });
                    return smallvec![Effect::None];
                }

                tracing::debug!(
                    order_id = %state.order.id(),
                    after_ms = u64::try_from(after.as_millis()).unwrap_or(u64::MAX),
                    "delay watcher armed"
                );
                state.watch_pending = true;
                state.last_outcome = Some(Outcome::WatchArmed { after });
                smallvec![delay! {
                    duration: after,
                    action: RideAction::DelayElapsed
                }]
            },

            RideAction::DelayElapsed => {
                state.watch_pending = false;
                tracing::info!(order_id = %state.order.id(), "car is delayed");
                self.apply(state, RideEvent::CarDelayed, env);
                smallvec![Effect::None]
            },
        }
    }
}
