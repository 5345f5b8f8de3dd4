//! # Ride Lifecycle Core
//!
//! Core traits and types for the ride lifecycle reducer architecture.
//!
//! Business logic lives in reducers: pure functions
//! `(State, Action, Environment) → (State, Effects)`. Effects are values that
//! describe work (such as an action fed back after a delay); the runtime crate
//! executes them and feeds any resulting action back into the reducer.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature (one ride order and its bookkeeping)
//! - **Action**: All possible inputs to a reducer
//! - **Reducer**: Validates an action, mutates state, returns effects
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies (clock, notice sink)
//!
//! ## Example
//!
//! ```ignore
//! use ride_lifecycle_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! impl Reducer for RideReducer {
//!     type State = RideLifecycleState;
//!     type Action = RideAction;
//!     type Environment = RideEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut RideLifecycleState,
//!         action: RideAction,
//!         env: &RideEnvironment,
//!     ) -> SmallVec<[Effect<RideAction>; 4]> {
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Declarative helpers for building effects
pub mod effect_macros;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for RideReducer {
    ///     type State = RideLifecycleState;
    ///     type Action = RideAction;
    ///     type Environment = RideEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut RideLifecycleState,
    ///         action: RideAction,
    ///         env: &RideEnvironment,
    ///     ) -> SmallVec<[Effect<RideAction>; 4]> {
    ///         match action {
    ///             RideAction::Dispatch { event } => {
    ///                 // Validate against the transition table, mutate state
    ///                 smallvec![Effect::None]
    ///             }
    ///             _ => smallvec![Effect::None],
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution); the reducer returns them and the Store
/// decides when they run.
pub mod effect {
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Delayed action (for timeouts, watchers)
        ///
        /// The action is fed back into the reducer once `duration` has elapsed.
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },
    }

    impl<Action> Effect<Action> {
        /// Whether this effect does nothing when executed
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Destination for the human-readable notices a reducer emits
    ///
    /// Reducers describe what happened through notices (a transition record,
    /// a "car has arrived" message). Production sinks write them to the log,
    /// test sinks record them so the emitted order can be asserted.
    pub trait NoticeSink<N>: Send + Sync {
        /// Deliver one notice
        fn emit(&self, notice: N);
    }
}
