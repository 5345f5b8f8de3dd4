//! Core domain types for the ride order lifecycle.
//!
//! A ride order cycles `Idle → CarSelected → OrderConfirmed → CarArrived →
//! InTrip → TripCompleted → Idle`, with cancellation branches into the
//! absorbing `TripCancelled` state.

use crate::error::RatingError;
use crate::table::transitions;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a ride order
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    /// Creates a new `OrderId` from a string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Where a ride order currently sits in its lifecycle
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RideState {
    /// Initial state, re-entered after a successful payment
    Idle,
    /// A car has been picked
    CarSelected,
    /// The order is confirmed and the car is on its way
    OrderConfirmed,
    /// The car is at the pickup point
    CarArrived,
    /// The passenger is riding
    InTrip,
    /// The trip ended and payment is pending
    TripCompleted,
    /// The order was cancelled; no further event is accepted
    TripCancelled,
}

impl RideState {
    /// Every state, in lifecycle order
    pub const ALL: [Self; 7] = [
        Self::Idle,
        Self::CarSelected,
        Self::OrderConfirmed,
        Self::CarArrived,
        Self::InTrip,
        Self::TripCompleted,
        Self::TripCancelled,
    ];

    /// Stable name of the state
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::CarSelected => "CarSelected",
            Self::OrderConfirmed => "OrderConfirmed",
            Self::CarArrived => "CarArrived",
            Self::InTrip => "InTrip",
            Self::TripCompleted => "TripCompleted",
            Self::TripCancelled => "TripCancelled",
        }
    }

    /// Whether no event can move an order out of this state
    #[must_use]
    pub fn is_terminal(self) -> bool {
        transitions().is_terminal(self)
    }
}

impl fmt::Display for RideState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stimulus requesting a change of a ride order's state
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RideEvent {
    /// Passenger picks a car
    SelectCar,
    /// Passenger confirms the order
    ConfirmOrder,
    /// Driver reports arrival at the pickup point
    CarArrived,
    /// Trip begins
    StartTrip,
    /// Trip ends
    EndTrip,
    /// Passenger cancels before the trip starts
    CancelOrder,
    /// Dispatch latency exceeded; raised by the delay watcher
    CarDelayed,
    /// Payment went through
    PaymentSuccess,
    /// Payment was declined; may be retried
    PaymentFailed,
    /// Passenger swaps the selected car
    ChangeCar,
    /// Trip aborted while riding
    EmergencyCancel,
}

impl RideEvent {
    /// Every event
    pub const ALL: [Self; 11] = [
        Self::SelectCar,
        Self::ConfirmOrder,
        Self::CarArrived,
        Self::StartTrip,
        Self::EndTrip,
        Self::CancelOrder,
        Self::CarDelayed,
        Self::PaymentSuccess,
        Self::PaymentFailed,
        Self::ChangeCar,
        Self::EmergencyCancel,
    ];

    /// Stable name of the event
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelectCar => "SelectCar",
            Self::ConfirmOrder => "ConfirmOrder",
            Self::CarArrived => "CarArrived",
            Self::StartTrip => "StartTrip",
            Self::EndTrip => "EndTrip",
            Self::CancelOrder => "CancelOrder",
            Self::CarDelayed => "CarDelayed",
            Self::PaymentSuccess => "PaymentSuccess",
            Self::PaymentFailed => "PaymentFailed",
            Self::ChangeCar => "ChangeCar",
            Self::EmergencyCancel => "EmergencyCancel",
        }
    }
}

impl fmt::Display for RideEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Passenger rating of a completed ride, always within `1..=5`
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating
    pub const MIN: u8 = 1;
    /// Highest accepted rating
    pub const MAX: u8 = 5;

    /// Returns the rating value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = RatingError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) if (Self::MIN..=Self::MAX).contains(&v) => Ok(Self(v)),
            _ => Err(RatingError::OutOfRange(value)),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single ride order
///
/// `state` has no public setter: it only changes through
/// [`LifecycleEngine::transition`](crate::engine::LifecycleEngine::transition),
/// which validates every change against the transition table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RideOrder {
    id: OrderId,
    state: RideState,
    car_id: Option<String>,
    driver: Option<String>,
    rating: Option<Rating>,
}

impl RideOrder {
    /// Creates a new order in the `Idle` state
    #[must_use]
    pub fn new(id: impl Into<OrderId>) -> Self {
        Self {
            id: id.into(),
            state: RideState::Idle,
            car_id: None,
            driver: None,
            rating: None,
        }
    }

    /// Attaches the descriptive car and driver details
    #[must_use]
    pub fn with_car(mut self, car_id: impl Into<String>, driver: impl Into<String>) -> Self {
        self.car_id = Some(car_id.into());
        self.driver = Some(driver.into());
        self
    }

    /// Order identifier
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn state(&self) -> RideState {
        self.state
    }

    /// Assigned car, if any
    #[must_use]
    pub fn car_id(&self) -> Option<&str> {
        self.car_id.as_deref()
    }

    /// Assigned driver, if any
    #[must_use]
    pub fn driver(&self) -> Option<&str> {
        self.driver.as_deref()
    }

    /// Submitted rating, if any
    #[must_use]
    pub const fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub(crate) const fn set_state(&mut self, state: RideState) {
        self.state = state;
    }

    pub(crate) const fn set_rating(&mut self, rating: Rating) {
        self.rating = Some(rating);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_order_starts_idle_without_details() {
        let order = RideOrder::new("RIDE-001");
        assert_eq!(order.id().as_str(), "RIDE-001");
        assert_eq!(order.state(), RideState::Idle);
        assert_eq!(order.car_id(), None);
        assert_eq!(order.driver(), None);
        assert_eq!(order.rating(), None);
    }

    #[test]
    fn with_car_fills_descriptive_fields() {
        let order = RideOrder::new("RIDE-001").with_car("CAR-42", "Dana");
        assert_eq!(order.car_id(), Some("CAR-42"));
        assert_eq!(order.driver(), Some("Dana"));
        assert_eq!(order.state(), RideState::Idle);
    }

    #[test]
    fn rating_bounds() {
        assert_eq!(Rating::try_from(1).map(Rating::value), Ok(1));
        assert_eq!(Rating::try_from(5).map(Rating::value), Ok(5));
        assert_eq!(Rating::try_from(0), Err(RatingError::OutOfRange(0)));
        assert_eq!(Rating::try_from(6), Err(RatingError::OutOfRange(6)));
        assert_eq!(Rating::try_from(-3), Err(RatingError::OutOfRange(-3)));
        assert_eq!(Rating::try_from(261), Err(RatingError::OutOfRange(261)));
    }

    #[test]
    fn only_cancelled_is_terminal() {
        for state in RideState::ALL {
            assert_eq!(state.is_terminal(), state == RideState::TripCancelled, "{state}");
        }
    }

    #[test]
    fn display_uses_variant_names() {
        assert_eq!(RideState::OrderConfirmed.to_string(), "OrderConfirmed");
        assert_eq!(RideEvent::EmergencyCancel.to_string(), "EmergencyCancel");
        assert_eq!(OrderId::from("RIDE-9").to_string(), "RIDE-9");
    }

    #[test]
    fn order_serializes_with_state_name() {
        let order = RideOrder::new("RIDE-001").with_car("CAR-1", "Sam");
        let json = serde_json::to_value(&order).unwrap_or_default();
        assert_eq!(json["state"], "Idle");
        assert_eq!(json["car_id"], "CAR-1");
        assert!(json["rating"].is_null());
    }
}
