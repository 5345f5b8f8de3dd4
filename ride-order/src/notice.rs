//! Observable output of the lifecycle: transition records, effect
//! messages, rejections and rating results.

use crate::error::{InvalidTransition, RatingError};
use crate::types::{OrderId, Rating, RideEvent, RideState};
use chrono::{DateTime, Utc};
use ride_lifecycle_core::environment::NoticeSink;
use serde::Serialize;

/// A successfully applied transition
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Order that moved
    pub order_id: OrderId,
    /// State before the event
    pub from: RideState,
    /// Applied event
    pub event: RideEvent,
    /// State after the event
    pub to: RideState,
    /// When the transition was applied
    pub at: DateTime<Utc>,
}

/// One entry of the ordered notice stream
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RideNotice {
    /// Transition record, emitted before the state changes
    Transitioned(Transition),
    /// Human-readable effect of an applied event, emitted after the state changed
    Described {
        /// Order that moved
        order_id: OrderId,
        /// Applied event
        event: RideEvent,
        /// Effect message for the event
        message: &'static str,
    },
    /// An event was not accepted
    Rejected(InvalidTransition),
    /// A rating was stored
    RatingAccepted {
        /// Rated order
        order_id: OrderId,
        /// Stored rating
        rating: Rating,
    },
    /// A rating was refused
    RatingRejected {
        /// Rated order
        order_id: OrderId,
        /// Why it was refused
        error: RatingError,
    },
}

/// Effect message for an applied event
#[must_use]
pub const fn describe(event: RideEvent) -> &'static str {
    match event {
        RideEvent::SelectCar => "car selected",
        RideEvent::ConfirmOrder => "order confirmed, car en route",
        RideEvent::CarArrived => "car has arrived",
        RideEvent::StartTrip => "trip started",
        RideEvent::EndTrip => "trip completed, payment pending",
        RideEvent::CancelOrder | RideEvent::CarDelayed | RideEvent::EmergencyCancel => {
            "order cancelled"
        },
        RideEvent::PaymentSuccess => "payment successful",
        RideEvent::PaymentFailed => "payment failed, retry required",
        RideEvent::ChangeCar => "car changed",
    }
}

/// Default sink: writes every notice as a structured `tracing` event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotices;

impl NoticeSink<RideNotice> for TracingNotices {
    fn emit(&self, notice: RideNotice) {
        match notice {
            RideNotice::Transitioned(t) => tracing::info!(
                order_id = %t.order_id,
                from = %t.from,
                event = %t.event,
                to = %t.to,
                at = %t.at,
                "{} -> {}",
                t.from,
                t.to
            ),
            RideNotice::Described {
                order_id,
                event,
                message,
            } => tracing::info!(order_id = %order_id, event = %event, "{message}"),
            RideNotice::Rejected(error) => tracing::warn!(
                order_id = %error.order_id,
                from = %error.from,
                event = %error.event,
                "transition rejected"
            ),
            RideNotice::RatingAccepted { order_id, rating } => {
                tracing::info!(order_id = %order_id, rating = rating.value(), "thank you for the rating");
            },
            RideNotice::RatingRejected { order_id, error } => {
                tracing::warn!(order_id = %order_id, %error, "rating rejected");
            },
        }
    }
}
