//! Properties of the engine over every `(state, event)` pair.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use proptest::prelude::*;
use ride_lifecycle_testing::{RecordingSink, test_clock};
use ride_order::{
    LifecycleEngine, RideEnvironment, RideEvent, RideNotice, RideOrder, RideState, transitions,
};
use std::sync::Arc;

fn any_state() -> impl Strategy<Value = RideState> {
    prop::sample::select(RideState::ALL.to_vec())
}

fn any_event() -> impl Strategy<Value = RideEvent> {
    prop::sample::select(RideEvent::ALL.to_vec())
}

fn env() -> (RideEnvironment, Arc<RecordingSink<RideNotice>>) {
    let notices = Arc::new(RecordingSink::new());
    (
        RideEnvironment::new(Arc::new(test_clock()), notices.clone()),
        notices,
    )
}

/// The lifecycle written out by hand, independent of `TransitionTable`
fn expected_target(state: RideState, event: RideEvent) -> Option<RideState> {
    use RideEvent as E;
    use RideState as S;

    match (state, event) {
        (S::Idle, E::SelectCar) | (S::CarSelected, E::ChangeCar) => Some(S::CarSelected),
        (S::CarSelected, E::ConfirmOrder) => Some(S::OrderConfirmed),
        (S::OrderConfirmed, E::CarArrived) => Some(S::CarArrived),
        (S::CarArrived, E::StartTrip) => Some(S::InTrip),
        (S::InTrip, E::EndTrip) | (S::TripCompleted, E::PaymentFailed) => Some(S::TripCompleted),
        (S::TripCompleted, E::PaymentSuccess) => Some(S::Idle),
        (
            S::Idle | S::CarSelected | S::OrderConfirmed | S::CarArrived,
            E::CancelOrder,
        )
        | (S::OrderConfirmed, E::CarDelayed)
        | (S::InTrip, E::EmergencyCancel) => Some(S::TripCancelled),
        _ => None,
    }
}

/// Drive a fresh order into `state` along the shortest path from `Idle`
fn order_in(state: RideState, env: &RideEnvironment) -> RideOrder {
    let engine = LifecycleEngine::standard();
    let mut order = RideOrder::new("RIDE-P");
    for event in transitions().path_to(RideState::Idle, state).expect("reachable") {
        engine.transition(&mut order, event, env).expect("path is legal");
    }
    assert_eq!(order.state(), state);
    order
}

proptest! {
    #[test]
    fn transition_follows_the_table(state in any_state(), event in any_event()) {
        let (env, notices) = env();
        let engine = LifecycleEngine::standard();
        let mut order = order_in(state, &env);
        let _ = notices.drain();

        let allowed = engine.can_transition(&order, event);
        prop_assert_eq!(allowed, expected_target(state, event).is_some());
        prop_assert_eq!(transitions().target(state, event), expected_target(state, event));

        let result = engine.transition(&mut order, event, &env);
        let emitted = notices.drain();

        match expected_target(state, event) {
            Some(to) => {
                let applied = result.expect("table allows the pair");
                prop_assert_eq!(applied.from, state);
                prop_assert_eq!(applied.to, to);
                prop_assert_eq!(order.state(), to);
                prop_assert_eq!(emitted.len(), 2);
                let recorded = matches!(emitted[0], RideNotice::Transitioned(_));
                prop_assert!(recorded);
                let described = matches!(
                    &emitted[1],
                    RideNotice::Described { event: e, .. } if *e == event
                );
                prop_assert!(described);
            },
            None => {
                let error = result.expect_err("table rejects the pair");
                prop_assert_eq!(error.from, state);
                prop_assert_eq!(error.event, event);
                prop_assert_eq!(order.state(), state);
                prop_assert_eq!(emitted, vec![RideNotice::Rejected(error)]);
            },
        }
    }

    #[test]
    fn random_event_sequences_match_the_table(
        events in prop::collection::vec(any_event(), 0..40)
    ) {
        let (env, _notices) = env();
        let engine = LifecycleEngine::standard();
        let mut order = RideOrder::new("RIDE-S");
        let mut model = RideState::Idle;

        for event in events {
            let result = engine.transition(&mut order, event, &env);
            if let Some(next) = expected_target(model, event) {
                prop_assert!(result.is_ok());
                model = next;
            } else {
                prop_assert!(result.is_err());
            }
            prop_assert_eq!(order.state(), model);
        }
    }

    #[test]
    fn cancelled_is_absorbing(event in any_event()) {
        let (env, _notices) = env();
        let engine = LifecycleEngine::standard();
        let mut order = order_in(RideState::TripCancelled, &env);

        prop_assert!(engine.transition(&mut order, event, &env).is_err());
        prop_assert_eq!(order.state(), RideState::TripCancelled);
    }

    #[test]
    fn rating_never_changes_state(state in any_state(), rating in -10i32..20) {
        let (env, notices) = env();
        let engine = LifecycleEngine::standard();
        let mut order = order_in(state, &env);
        let _ = notices.drain();

        let result = engine.submit_rating(&mut order, rating, &env);

        prop_assert_eq!(order.state(), state);
        prop_assert_eq!(notices.len(), 1);
        prop_assert_eq!(
            result.is_ok(),
            state == RideState::Idle && (1..=5).contains(&rating)
        );
    }
}
