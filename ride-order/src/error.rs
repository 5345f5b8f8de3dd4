//! Error types for the ride lifecycle.

use crate::types::{OrderId, RideEvent, RideState};
use ride_lifecycle_runtime::StoreError;
use thiserror::Error;

/// An event was dispatched in a state whose table row does not accept it
///
/// The order is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid transition for order {order_id}: {event} is not accepted in state {from}")]
pub struct InvalidTransition {
    /// Order the event targeted
    pub order_id: OrderId,
    /// State the order was in
    pub from: RideState,
    /// Rejected event
    pub event: RideEvent,
}

/// Rating submission failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingError {
    /// The order has not finished a trip cycle
    #[error("rating can only be submitted once the ride is back in Idle (currently {state})")]
    NotEligible {
        /// State the order was in
        state: RideState,
    },

    /// The value is outside `1..=5`
    #[error("rating must be between 1 and 5, got {0}")]
    OutOfRange(i32),
}

/// Errors surfaced by a [`RideSession`](crate::session::RideSession)
#[derive(Error, Debug)]
pub enum RideError {
    /// Rejected lifecycle event
    #[error(transparent)]
    Transition(#[from] InvalidTransition),

    /// Rejected rating
    #[error(transparent)]
    Rating(#[from] RatingError),

    /// The underlying store refused the action
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The reducer left no outcome for the action
    #[error("no outcome recorded for {0}")]
    MissingOutcome(&'static str),
}

/// Invalid runtime configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable could not be parsed
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// Parse failure
        reason: String,
    },

    /// Values parsed but are inconsistent
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_message_names_state_and_event() {
        let error = InvalidTransition {
            order_id: OrderId::new("RIDE-001"),
            from: RideState::Idle,
            event: RideEvent::StartTrip,
        };
        let message = error.to_string();
        assert!(message.contains("RIDE-001"));
        assert!(message.contains("StartTrip"));
        assert!(message.contains("Idle"));
    }

    #[test]
    fn ride_error_is_transparent_over_domain_errors() {
        let error = RideError::from(RatingError::OutOfRange(9));
        assert_eq!(error.to_string(), "rating must be between 1 and 5, got 9");

        let error = RideError::from(StoreError::ShutdownInProgress);
        assert!(matches!(error, RideError::Store(StoreError::ShutdownInProgress)));
    }
}
