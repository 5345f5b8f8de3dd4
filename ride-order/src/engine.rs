//! The order lifecycle engine.
//!
//! Validates events against the transition table, applies legal ones, and
//! emits the notice stream. The engine itself is stateless: it borrows the
//! table and operates on whatever order it is handed.

use crate::environment::RideEnvironment;
use crate::error::{InvalidTransition, RatingError};
use crate::notice::{RideNotice, Transition, describe};
use crate::table::{TransitionTable, transitions};
use crate::types::{Rating, RideEvent, RideOrder, RideState};

/// Applies lifecycle events to ride orders
#[derive(Debug, Clone, Copy)]
pub struct LifecycleEngine<'t> {
    table: &'t TransitionTable,
}

impl<'t> LifecycleEngine<'t> {
    /// Engine over an explicit table
    #[must_use]
    pub const fn new(table: &'t TransitionTable) -> Self {
        Self { table }
    }

    /// The table this engine validates against
    #[must_use]
    pub const fn table(&self) -> &'t TransitionTable {
        self.table
    }

    /// Whether `event` would be accepted in the order's current state
    #[must_use]
    pub fn can_transition(&self, order: &RideOrder, event: RideEvent) -> bool {
        self.table.allows(order.state(), event)
    }

    /// Apply `event` to `order`
    ///
    /// On success the notice stream receives the transition record, then the
    /// order moves, then the event's effect message follows.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] when the current state does not accept
    /// `event`. The order is left unchanged and a `Rejected` notice is emitted.
    pub fn transition(
        &self,
        order: &mut RideOrder,
        event: RideEvent,
        env: &RideEnvironment,
    ) -> Result<Transition, InvalidTransition> {
        let from = order.state();

        let Some(to) = self.table.target(from, event) else {
            let error = InvalidTransition {
                order_id: order.id().clone(),
                from,
                event,
            };
            env.notices.emit(RideNotice::Rejected(error.clone()));
            return Err(error);
        };

        let transition = Transition {
            order_id: order.id().clone(),
            from,
            event,
            to,
            at: env.clock.now(),
        };
        env.notices
            .emit(RideNotice::Transitioned(transition.clone()));

        order.set_state(to);

        env.notices.emit(RideNotice::Described {
            order_id: order.id().clone(),
            event,
            message: describe(event),
        });

        Ok(transition)
    }

    /// Record a passenger rating
    ///
    /// Eligibility is checked before the range. The order's state is not
    /// touched.
    ///
    /// # Errors
    ///
    /// - [`RatingError::NotEligible`] unless the order is `Idle`
    /// - [`RatingError::OutOfRange`] unless `rating` is within `1..=5`
    pub fn submit_rating(
        &self,
        order: &mut RideOrder,
        rating: i32,
        env: &RideEnvironment,
    ) -> Result<Rating, RatingError> {
        let result = if order.state() == RideState::Idle {
            Rating::try_from(rating)
        } else {
            Err(RatingError::NotEligible {
                state: order.state(),
            })
        };

        match result {
            Ok(rating) => {
                order.set_rating(rating);
                env.notices.emit(RideNotice::RatingAccepted {
                    order_id: order.id().clone(),
                    rating,
                });
                Ok(rating)
            },
            Err(error) => {
                env.notices.emit(RideNotice::RatingRejected {
                    order_id: order.id().clone(),
                    error,
                });
                Err(error)
            },
        }
    }
}

impl LifecycleEngine<'static> {
    /// Engine over the process-wide standard table
    #[must_use]
    pub fn standard() -> Self {
        Self::new(transitions())
    }
}

impl Default for LifecycleEngine<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use ride_lifecycle_core::environment::Clock;
    use ride_lifecycle_testing::{RecordingSink, test_clock};
    use std::sync::Arc;

    fn setup() -> (LifecycleEngine<'static>, RideEnvironment, Arc<RecordingSink<RideNotice>>) {
        let notices = Arc::new(RecordingSink::new());
        let env = RideEnvironment::new(Arc::new(test_clock()), notices.clone());
        (LifecycleEngine::standard(), env, notices)
    }

    #[test]
    fn transition_emits_record_then_message() {
        let (engine, env, notices) = setup();
        let mut order = RideOrder::new("RIDE-001");

        let applied = engine
            .transition(&mut order, RideEvent::SelectCar, &env)
            .expect("SelectCar is legal from Idle");

        assert_eq!(applied.from, RideState::Idle);
        assert_eq!(applied.to, RideState::CarSelected);
        assert_eq!(applied.at, test_clock().now());
        assert_eq!(order.state(), RideState::CarSelected);
        assert_eq!(
            notices.drain(),
            vec![
                RideNotice::Transitioned(applied),
                RideNotice::Described {
                    order_id: order.id().clone(),
                    event: RideEvent::SelectCar,
                    message: "car selected",
                },
            ]
        );
    }

    #[test]
    fn rejected_transition_leaves_order_unchanged() {
        let (engine, env, notices) = setup();
        let mut order = RideOrder::new("RIDE-002");
        let before = order.clone();

        let result = engine.transition(&mut order, RideEvent::StartTrip, &env);

        let expected = InvalidTransition {
            order_id: order.id().clone(),
            from: RideState::Idle,
            event: RideEvent::StartTrip,
        };
        assert_eq!(result, Err(expected.clone()));
        assert_eq!(order, before);
        assert_eq!(notices.drain(), vec![RideNotice::Rejected(expected)]);
    }

    #[test]
    fn self_loops_emit_both_notices() {
        let (engine, env, notices) = setup();
        let mut order = RideOrder::new("RIDE-003");
        assert!(engine.transition(&mut order, RideEvent::SelectCar, &env).is_ok());
        let _ = notices.drain();

        assert!(engine.transition(&mut order, RideEvent::ChangeCar, &env).is_ok());
        assert_eq!(order.state(), RideState::CarSelected);

        let emitted = notices.drain();
        assert_eq!(emitted.len(), 2);
        assert!(matches!(
            &emitted[0],
            RideNotice::Transitioned(t)
                if t.from == RideState::CarSelected && t.to == RideState::CarSelected
        ));
        assert_eq!(
            emitted[1],
            RideNotice::Described {
                order_id: order.id().clone(),
                event: RideEvent::ChangeCar,
                message: "car changed",
            }
        );
    }

    #[test]
    fn rating_checks_eligibility_before_range() {
        let (engine, env, notices) = setup();
        let mut order = RideOrder::new("RIDE-004");
        assert!(engine.transition(&mut order, RideEvent::SelectCar, &env).is_ok());
        let _ = notices.drain();

        assert_eq!(
            engine.submit_rating(&mut order, 9, &env),
            Err(RatingError::NotEligible {
                state: RideState::CarSelected
            })
        );
        assert_eq!(order.rating(), None);
        assert_eq!(notices.len(), 1);
    }

    #[test]
    fn rating_is_stored_without_changing_state() {
        let (engine, env, notices) = setup();
        let mut order = RideOrder::new("RIDE-005");

        assert_eq!(engine.submit_rating(&mut order, 0, &env), Err(RatingError::OutOfRange(0)));
        let stored = engine.submit_rating(&mut order, 4, &env);

        assert_eq!(stored.map(Rating::value), Ok(4));
        assert_eq!(order.rating().map(Rating::value), Some(4));
        assert_eq!(order.state(), RideState::Idle);
        assert!(matches!(
            notices.notices().last(),
            Some(RideNotice::RatingAccepted { .. })
        ));
    }

    #[test]
    fn can_transition_is_a_pure_query() {
        let (engine, _env, notices) = setup();
        let order = RideOrder::new("RIDE-006");
        assert!(engine.can_transition(&order, RideEvent::SelectCar));
        assert!(!engine.can_transition(&order, RideEvent::EndTrip));
        assert!(notices.is_empty());
    }
}
