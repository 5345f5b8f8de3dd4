//! Injected dependencies of the ride lifecycle.

use crate::notice::{RideNotice, TracingNotices};
use ride_lifecycle_core::environment::{Clock, NoticeSink, SystemClock};
use std::sync::Arc;

/// Environment for the ride reducer and engine
///
/// The clock stamps transition records; the sink receives the notice stream.
#[derive(Clone)]
pub struct RideEnvironment {
    /// Clock for transition timestamps
    pub clock: Arc<dyn Clock>,
    /// Destination of the ordered notice stream
    pub notices: Arc<dyn NoticeSink<RideNotice>>,
}

impl RideEnvironment {
    /// Creates an environment from explicit dependencies
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, notices: Arc<dyn NoticeSink<RideNotice>>) -> Self {
        Self { clock, notices }
    }

    /// System clock plus the `tracing` notice sink
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(TracingNotices))
    }
}

impl Default for RideEnvironment {
    fn default() -> Self {
        Self::production()
    }
}

impl std::fmt::Debug for RideEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RideEnvironment").finish_non_exhaustive()
    }
}
