//! The ride lifecycle transition table.
//!
//! Each `(state, event)` pair maps to at most one target state. Pairs with no
//! entry are rejected by the engine. The table is built once and shared by
//! reference between every engine.

use crate::types::{RideEvent, RideState};
use std::collections::{BTreeMap, VecDeque};
use std::sync::LazyLock;

static STANDARD: LazyLock<TransitionTable> = LazyLock::new(TransitionTable::standard);

/// The process-wide standard transition table
#[must_use]
pub fn transitions() -> &'static TransitionTable {
    &STANDARD
}

/// Read-only mapping `(state, event) → next state`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    edges: BTreeMap<RideState, BTreeMap<RideEvent, RideState>>,
}

impl TransitionTable {
    /// Builds the standard ride lifecycle table
    ///
    /// | From           | Event           | To             |
    /// |----------------|-----------------|----------------|
    /// | Idle           | SelectCar       | CarSelected    |
    /// | Idle           | CancelOrder     | TripCancelled  |
    /// | CarSelected    | ConfirmOrder    | OrderConfirmed |
    /// | CarSelected    | ChangeCar       | CarSelected    |
    /// | CarSelected    | CancelOrder     | TripCancelled  |
    /// | OrderConfirmed | CarArrived      | CarArrived     |
    /// | OrderConfirmed | CarDelayed      | TripCancelled  |
    /// | OrderConfirmed | CancelOrder     | TripCancelled  |
    /// | CarArrived     | StartTrip       | InTrip         |
    /// | CarArrived     | CancelOrder     | TripCancelled  |
    /// | InTrip         | EndTrip         | TripCompleted  |
    /// | InTrip         | EmergencyCancel | TripCancelled  |
    /// | TripCompleted  | PaymentSuccess  | Idle           |
    /// | TripCompleted  | PaymentFailed   | TripCompleted  |
    #[must_use]
    pub fn standard() -> Self {
        use RideEvent as E;
        use RideState as S;

        Self::from_entries([
            (S::Idle, E::SelectCar, S::CarSelected),
            (S::Idle, E::CancelOrder, S::TripCancelled),
            (S::CarSelected, E::ConfirmOrder, S::OrderConfirmed),
            (S::CarSelected, E::ChangeCar, S::CarSelected),
            (S::CarSelected, E::CancelOrder, S::TripCancelled),
            (S::OrderConfirmed, E::CarArrived, S::CarArrived),
            (S::OrderConfirmed, E::CarDelayed, S::TripCancelled),
            (S::OrderConfirmed, E::CancelOrder, S::TripCancelled),
            (S::CarArrived, E::StartTrip, S::InTrip),
            (S::CarArrived, E::CancelOrder, S::TripCancelled),
            (S::InTrip, E::EndTrip, S::TripCompleted),
            (S::InTrip, E::EmergencyCancel, S::TripCancelled),
            (S::TripCompleted, E::PaymentSuccess, S::Idle),
            (S::TripCompleted, E::PaymentFailed, S::TripCompleted),
        ])
    }

    // Every state gets a row, so terminal states show up with no edges.
    fn from_entries(entries: impl IntoIterator<Item = (RideState, RideEvent, RideState)>) -> Self {
        let mut edges: BTreeMap<_, BTreeMap<_, _>> =
            RideState::ALL.iter().map(|state| (*state, BTreeMap::new())).collect();
        for (from, event, to) in entries {
            edges.entry(from).or_default().insert(event, to);
        }
        Self { edges }
    }

    /// Target state for `event` in `from`, if the pair is defined
    #[must_use]
    pub fn target(&self, from: RideState, event: RideEvent) -> Option<RideState> {
        self.edges.get(&from).and_then(|row| row.get(&event)).copied()
    }

    /// Whether `event` is accepted in `from`
    #[must_use]
    pub fn allows(&self, from: RideState, event: RideEvent) -> bool {
        self.target(from, event).is_some()
    }

    /// Every `(event, target)` pair accepted in `from`
    pub fn events_from(&self, from: RideState) -> impl Iterator<Item = (RideEvent, RideState)> + '_ {
        self.edges
            .get(&from)
            .into_iter()
            .flat_map(|row| row.iter().map(|(event, to)| (*event, *to)))
    }

    /// Whether `state` accepts no event at all
    #[must_use]
    pub fn is_terminal(&self, state: RideState) -> bool {
        self.events_from(state).next().is_none()
    }

    /// Number of defined transitions
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    /// Whether the table defines no transition
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shortest event sequence leading from `from` to `to`
    ///
    /// Returns `Some(vec![])` when both states are equal and `None` when `to`
    /// is unreachable. Ties are broken by event declaration order.
    #[must_use]
    pub fn path_to(&self, from: RideState, to: RideState) -> Option<Vec<RideEvent>> {
        if from == to {
            return Some(Vec::new());
        }

        let mut parents: BTreeMap<RideState, (RideState, RideEvent)> = BTreeMap::new();
        let mut queue = VecDeque::from([from]);

        while let Some(state) = queue.pop_front() {
            for (event, next) in self.events_from(state) {
                if next == from || parents.contains_key(&next) {
                    continue;
                }
                parents.insert(next, (state, event));
                if next == to {
                    let mut path = Vec::new();
                    let mut cursor = to;
                    while let Some((prev, event)) = parents.get(&cursor) {
                        path.push(*event);
                        cursor = *prev;
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(next);
            }
        }

        None
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}
