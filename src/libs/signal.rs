//! Level-triggered wake signal between the motion interrupt and the watcher loop.
//!
//! The interrupt side calls [`MotionSignal::set`]; the single waiter calls
//! [`MotionSignal::wait`]. The signal is one boolean, so any number of edges
//! raised before the waiter looks at it collapse into a single
//! [`Wake::Motion`]. Callers cannot tell one edge from many within a cycle.
//!
//! Closing the signal is how a termination request reaches the loop: a closed
//! signal wakes the waiter at once and keeps reporting [`Wake::Closed`].
//! Failing it is how the edge source reports that no more edges will come.

use crate::libs::gpio::GpioError;
use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// Outcome of one [`MotionSignal::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// At least one edge arrived since the previous wake.
    Motion,
    /// The timeout elapsed with no edge.
    Timeout,
    /// The signal was closed; the waiter should stop.
    Closed,
    /// The edge source died; the error is in [`MotionSignal::take_failure`].
    Failed,
}

#[derive(Debug, Default)]
struct SignalState {
    pending: bool,
    closed: bool,
    failed: bool,
    failure: Option<GpioError>,
}

impl SignalState {
    /// Close wins, then failure, then a pending edge.
    fn take_wake(&mut self) -> Option<Wake> {
        if self.closed {
            return Some(Wake::Closed);
        }
        if self.failed {
            return Some(Wake::Failed);
        }
        if self.pending {
            self.pending = false;
            return Some(Wake::Motion);
        }
        None
    }
}

#[derive(Debug, Default)]
pub struct MotionSignal {
    state: Mutex<SignalState>,
    cond: Condvar,
}

impl MotionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the signal. Called from the interrupt context, does nothing else.
    pub fn set(&self) {
        let mut state = self.state.lock();
        state.pending = true;
        self.cond.notify_one();
    }

    /// Blocks until the signal is raised, closed, failed, or `timeout` elapses.
    ///
    /// A raised signal is cleared under the same lock that observed it, so an
    /// edge arriving right after the wake starts the next cycle instead of
    /// being lost. A timeout too large to represent waits without a deadline.
    pub fn wait(&self, timeout: Duration) -> Wake {
        let deadline = Instant::now().checked_add(timeout);
        let mut state = self.state.lock();
        loop {
            if let Some(wake) = state.take_wake() {
                return wake;
            }
            match deadline {
                Some(deadline) => {
                    if self.cond.wait_until(&mut state, deadline).timed_out() {
                        return state.take_wake().unwrap_or(Wake::Timeout);
                    }
                }
                None => self.cond.wait(&mut state),
            }
        }
    }

    /// Marks the signal closed and wakes the waiter. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        self.cond.notify_all();
    }

    /// Reports that the edge source stopped for good. The first error is kept.
    pub fn fail(&self, error: GpioError) {
        let mut state = self.state.lock();
        if !state.failed {
            state.failed = true;
            state.failure = Some(error);
        }
        self.cond.notify_all();
    }

    /// The error passed to [`MotionSignal::fail`], once. The signal stays failed.
    pub fn take_failure(&self) -> Option<GpioError> {
        self.state.lock().failure.take()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn is_failed(&self) -> bool {
        self.state.lock().failed
    }

    /// Whether an edge is waiting to be observed.
    pub fn is_pending(&self) -> bool {
        self.state.lock().pending
    }
}
