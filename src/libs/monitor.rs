//! The watcher loop.
//!
//! [`Supervisor`] owns every piece of runtime state: the motion signal, the
//! interrupt registration, the activity tracker, the optional screen and the
//! event recorder. Nothing is global; the handlers get what they need by
//! reference.
//!
//! ```text
//! edge ──▶ MotionSignal ──wait(SLEEP_TIME)──▶ Motion  ──▶ tracker.on_motion
//!                                         └─▶ Timeout ──▶ tracker.on_timeout
//!                                         └─▶ Closed  ──▶ release pins, return
//!                                         └─▶ Failed  ──▶ release pins, error
//! ```

use crate::libs::activity::ActivityTracker;
use crate::libs::gpio::{GpioError, MotionSource};
use crate::libs::messages::Message;
use crate::libs::recorder::EventRecorder;
use crate::libs::screen::{ScreenError, ScreenPower};
use crate::libs::signal::{MotionSignal, Wake};
use crate::{msg_error, msg_info, msg_warning};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// How long the loop waits for motion before checking for inactivity.
pub const SLEEP_TIME: Duration = Duration::from_secs(60 * 5);

#[derive(Debug, Error)]
pub enum WatchError {
    #[error(transparent)]
    Gpio(#[from] GpioError),

    #[error(transparent)]
    Screen(#[from] ScreenError),
}

pub struct Supervisor {
    signal: Arc<MotionSignal>,
    source: Box<dyn MotionSource>,
    tracker: ActivityTracker,
    screen: Option<Box<dyn ScreenPower>>,
    recorder: EventRecorder,
    poll_interval: Duration,
    clock: fn() -> Instant,
}

impl Supervisor {
    pub fn new(source: Box<dyn MotionSource>, tracker: ActivityTracker, screen: Option<Box<dyn ScreenPower>>, recorder: EventRecorder) -> Self {
        Self {
            signal: Arc::new(MotionSignal::new()),
            source,
            tracker,
            screen,
            recorder,
            poll_interval: SLEEP_TIME,
            clock: Instant::now,
        }
    }

    /// Overrides [`SLEEP_TIME`].
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Overrides the time source handed to the tracker.
    pub fn with_clock(mut self, clock: fn() -> Instant) -> Self {
        self.clock = clock;
        self
    }

    /// Handle for raising motion or requesting shutdown from another thread.
    pub fn signal(&self) -> Arc<MotionSignal> {
        self.signal.clone()
    }

    pub fn tracker(&self) -> &ActivityTracker {
        &self.tracker
    }

    pub fn screen(&self) -> Option<&dyn ScreenPower> {
        self.screen.as_deref()
    }

    /// Runs until the signal is closed, the edge source fails, or a screen action fails.
    ///
    /// The interrupt registration is released exactly once on every exit
    /// path, panics included.
    pub fn run(&mut self) -> Result<(), WatchError> {
        let mut interrupt = InterruptGuard::new(&mut *self.source);
        interrupt.start(self.signal.clone())?;
        msg_info!(Message::WatcherReady);

        let outcome = loop {
            let step = match self.signal.wait(self.poll_interval) {
                Wake::Motion => self.tracker.on_motion((self.clock)(), self.screen.as_deref_mut(), &self.recorder),
                Wake::Timeout => self.tracker.on_timeout((self.clock)(), self.screen.as_deref_mut(), &self.recorder),
                Wake::Closed => break Ok(()),
                Wake::Failed => {
                    let error = self.signal.take_failure().unwrap_or_else(|| GpioError::Watcher {
                        pin: 0,
                        reason: "edge source failed".to_string(),
                    });
                    break Err(WatchError::from(error));
                }
            };
            if let Err(e) = step {
                break Err(WatchError::from(e));
            }
        };

        let released = interrupt.release();
        outcome?;
        released.map_err(WatchError::from)
    }
}

/// Stops the motion source when the loop ends, however it ends.
struct InterruptGuard<'a, M: MotionSource + ?Sized> {
    source: &'a mut M,
    released: bool,
}

impl<'a, M: MotionSource + ?Sized> InterruptGuard<'a, M> {
    fn new(source: &'a mut M) -> Self {
        Self { source, released: false }
    }

    fn start(&mut self, signal: Arc<MotionSignal>) -> Result<(), GpioError> {
        self.source.start(signal)
    }

    fn release(&mut self) -> Result<(), GpioError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        msg_warning!(Message::WatcherCleaningUp);
        self.source.stop()
    }
}

impl<M: MotionSource + ?Sized> Drop for InterruptGuard<'_, M> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            msg_error!(Message::GpioCleanupFailed(e.to_string()));
        }
    }
}
