//! # Ride Lifecycle Testing
//!
//! Testing utilities and helpers for the ride lifecycle architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then builder for reducer tests
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use ride_lifecycle_testing::{test_clock, RecordingSink};
//! use ride_lifecycle_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_ride_flow() {
//!     let notices = Arc::new(RecordingSink::new());
//!     let env = RideEnvironment::new(Arc::new(test_clock()), notices.clone());
//!     let store = Store::new(RideLifecycleState::new(order), RideReducer::new(), env);
//!
//!     store.send(RideAction::Dispatch { event: RideEvent::SelectCar }).await?;
//!     assert_eq!(notices.len(), 2);
//! }
//! ```

use chrono::{DateTime, Utc};
use ride_lifecycle_core::environment::{Clock, NoticeSink};


/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, NoticeSink, Utc};
    use std::sync::{Mutex, MutexGuard, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use ride_lifecycle_testing::mocks::FixedClock;
    /// use ride_lifecycle_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Notice sink that keeps every notice in emission order
    ///
    /// # Example
    ///
    /// ```
    /// use ride_lifecycle_testing::mocks::RecordingSink;
    /// use ride_lifecycle_core::environment::NoticeSink;
    ///
    /// let sink = RecordingSink::new();
    /// sink.emit("car selected");
    /// sink.emit("order confirmed");
    /// assert_eq!(sink.notices(), vec!["car selected", "order confirmed"]);
    /// ```
    #[derive(Debug)]
    pub struct RecordingSink<N> {
        notices: Mutex<Vec<N>>,
    }

    impl<N> RecordingSink<N> {
        /// Create an empty sink
        #[must_use]
        pub const fn new() -> Self {
            Self {
                notices: Mutex::new(Vec::new()),
            }
        }

        /// Number of notices recorded so far
        #[must_use]
        pub fn len(&self) -> usize {
            self.lock().len()
        }

        /// Whether nothing has been recorded yet
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.lock().is_empty()
        }

        /// Take every recorded notice, leaving the sink empty
        #[must_use]
        pub fn drain(&self) -> Vec<N> {
            std::mem::take(&mut *self.lock())
        }

        // A poisoned lock only means another test thread panicked mid-push;
        // the recorded notices are still valid.
        fn lock(&self) -> MutexGuard<'_, Vec<N>> {
            self.notices.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl<N: Clone> RecordingSink<N> {
        /// Copy of every notice recorded so far, in emission order
        #[must_use]
        pub fn notices(&self) -> Vec<N> {
            self.lock().clone()
        }
    }

    impl<N> Default for RecordingSink<N> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<N: Send> NoticeSink<N> for RecordingSink<N> {
        fn emit(&self, notice: N) {
            self.lock().push(notice);
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, RecordingSink, test_clock};
pub use reducer_test::ReducerTest;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());

        sink.emit(1);
        sink.emit(2);
        sink.emit(3);

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.notices(), vec![1, 2, 3]);
        assert_eq!(sink.drain(), vec![1, 2, 3]);
        assert!(sink.is_empty());
    }
}
