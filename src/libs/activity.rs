//! Motion/inactivity state machine.
//!
//! [`ActivityTracker`] owns the time of the last motion and the one-shot
//! inactivity latch. The watcher loop calls [`ActivityTracker::on_motion`]
//! when the sensor fired and [`ActivityTracker::on_timeout`] when a poll
//! interval passed without it. Each handler decides whether an event is
//! worth recording and whether the screen should change.
//!
//! Inactivity is only noticed on timeouts, so a threshold crossing is
//! detected up to one poll interval late.

use crate::libs::event::{MotionEvent, MotionEventKind};
use crate::libs::messages::Message;
use crate::libs::recorder::EventRecorder;
use crate::libs::screen::{ScreenError, ScreenPower};
use crate::msg_debug;
use std::time::{Duration, Instant};

/// Inactivity that must pass before motion or its absence is worth recording.
pub const DB_MIN_INACTIVITY: Duration = Duration::from_secs(60 * 10);

/// Inactivity after which the screen is turned off.
pub const SCREEN_TIMEOUT: Duration = Duration::from_secs(60 * 10);

/// The tracker's state, exposed read-only for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow {
    pub last_motion: Instant,
    /// Set once the current inactivity episode has produced its `NO_MOTION_FOR` event.
    pub inactivity_logged: bool,
}

#[derive(Debug)]
pub struct ActivityTracker {
    device_name: String,
    window: ActivityWindow,
}

impl ActivityTracker {
    /// Starts a fresh window, treating `started` as the last motion.
    pub fn new(device_name: &str, started: Instant) -> Self {
        Self {
            device_name: device_name.to_string(),
            window: ActivityWindow {
                last_motion: started,
                inactivity_logged: false,
            },
        }
    }

    pub fn window(&self) -> ActivityWindow {
        self.window
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Time since the last motion, zero if `now` is earlier.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.window.last_motion)
    }

    /// The sensor fired.
    pub fn on_motion<S>(&mut self, now: Instant, screen: Option<&mut S>, recorder: &EventRecorder) -> Result<(), ScreenError>
    where
        S: ScreenPower + ?Sized,
    {
        msg_debug!(Message::MotionDetected);
        let elapsed = self.elapsed(now);

        if elapsed > DB_MIN_INACTIVITY {
            recorder.record(MotionEvent::new(&self.device_name, MotionEventKind::MotionAfterInactivity, elapsed));
        }
        self.window.inactivity_logged = false;

        if let Some(screen) = screen {
            screen.turn_on()?;
        }
        self.window.last_motion = now;
        Ok(())
    }

    /// A poll interval passed without motion.
    pub fn on_timeout<S>(&mut self, now: Instant, screen: Option<&mut S>, recorder: &EventRecorder) -> Result<(), ScreenError>
    where
        S: ScreenPower + ?Sized,
    {
        msg_debug!(Message::InactivityDetected);
        let elapsed = self.elapsed(now);

        if elapsed > DB_MIN_INACTIVITY && !self.window.inactivity_logged {
            recorder.record(MotionEvent::new(&self.device_name, MotionEventKind::NoMotionFor, elapsed));
            self.window.inactivity_logged = true;
        }

        if let Some(screen) = screen {
            if elapsed > SCREEN_TIMEOUT {
                screen.turn_off()?;
            }
        }
        Ok(())
    }
}
