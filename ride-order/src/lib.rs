//! # Ride Order
//!
//! Lifecycle of a ride-hailing order: a fixed transition table, an engine
//! that validates and applies events, and a delay watcher that cancels an
//! order whose car is late.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ─SelectCar→ CarSelected ─ConfirmOrder→ OrderConfirmed ─CarArrived→ CarArrived
//!   ↑                 ↺ ChangeCar                  │ CarDelayed                │ StartTrip
//!   │                                              ↓                           ↓
//!   └──PaymentSuccess── TripCompleted ←─EndTrip── InTrip      TripCancelled (absorbing)
//!                          ↺ PaymentFailed
//! ```
//!
//! Every pre-trip state also accepts `CancelOrder`, and `InTrip` accepts
//! `EmergencyCancel`; both lead to `TripCancelled`.
//!
//! ## Usage
//!
//! Owned orders go through [`LifecycleEngine`] directly. Orders shared with a
//! delay watcher live in a [`RideSession`], which serializes every operation
//! through a store.
//!
//! ```no_run
//! use ride_order::{RideEnvironment, RideEvent, RideOrder, RideSession};
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), ride_order::RideError> {
//! let session = RideSession::new(RideOrder::new("RIDE-001"), RideEnvironment::production());
//! session.transition(RideEvent::SelectCar).await?;
//! session.transition(RideEvent::ConfirmOrder).await?;
//! session.watch_for_delay(Duration::from_secs(2)).await?;
//! session.transition(RideEvent::CarArrived).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod environment;
pub mod error;
pub mod notice;
pub mod reducer;
pub mod session;
pub mod table;
pub mod types;
pub mod watcher;

pub use config::RideConfig;
pub use engine::LifecycleEngine;
pub use environment::RideEnvironment;
pub use error::{ConfigError, InvalidTransition, RatingError, RideError};
pub use notice::{RideNotice, TracingNotices, Transition, describe};
pub use reducer::{Outcome, RideAction, RideLifecycleState, RideReducer};
pub use session::{RideSession, RideStore};
pub use table::{TransitionTable, transitions};
pub use types::{OrderId, Rating, RideEvent, RideOrder, RideState};
pub use watcher::watch_for_delay;
