#![allow(dead_code)]

use parking_lot::Mutex;
use pirscreen::db::motions::{EventStore, StoreError};
use pirscreen::libs::event::MotionEvent;
use pirscreen::libs::gpio::{ControlLine, GpioError, MotionSource};
use pirscreen::libs::screen::{ScreenError, ScreenPower, ScreenState};
use pirscreen::libs::signal::MotionSignal;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Serialises tests that point `HOME` at a temporary directory.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// What happened on a fake control line, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOp {
    Low(Instant),
    Released(Instant),
}

/// Control line that records every transition.
#[derive(Clone, Default)]
pub struct FakeLine {
    ops: Arc<Mutex<Vec<LineOp>>>,
    broken: Arc<AtomicBool>,
}

impl FakeLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed presses: a low followed by a release.
    pub fn presses(&self) -> usize {
        self.ops.lock().iter().filter(|op| matches!(op, LineOp::Released(_))).count()
    }

    pub fn ops(&self) -> Vec<LineOp> {
        self.ops.lock().clone()
    }

    /// Makes every further transition fail.
    pub fn break_line(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), GpioError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(GpioError::Direction {
                pin: 25,
                direction: "low",
                source: io::Error::new(io::ErrorKind::PermissionDenied, "line unavailable"),
            });
        }
        Ok(())
    }
}

impl ControlLine for FakeLine {
    fn drive_low(&mut self) -> Result<(), GpioError> {
        self.check()?;
        self.ops.lock().push(LineOp::Low(Instant::now()));
        Ok(())
    }

    fn release(&mut self) -> Result<(), GpioError> {
        self.check()?;
        self.ops.lock().push(LineOp::Released(Instant::now()));
        Ok(())
    }
}

/// In-memory event store that can be switched to failing.
#[derive(Clone, Default)]
pub struct MemoryStore {
    events: Arc<Mutex<Vec<MotionEvent>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<MotionEvent> {
        self.events.lock().clone()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl EventStore for MemoryStore {
    fn append(&self, event: &MotionEvent) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::ConnectionFailed("store unavailable".to_string()));
        }
        self.events.lock().push(event.clone());
        Ok(())
    }
}

/// Motion source that counts registrations and releases.
#[derive(Clone, Default)]
pub struct FakeSource {
    pub starts: Arc<AtomicUsize>,
    pub stops: Arc<AtomicUsize>,
    fail_start: bool,
    die_after_start: bool,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    /// Registers, then reports that its edge watcher died.
    pub fn dying() -> Self {
        Self {
            die_after_start: true,
            ..Self::default()
        }
    }

    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl MotionSource for FakeSource {
    fn start(&mut self, signal: Arc<MotionSignal>) -> Result<(), GpioError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        if self.fail_start {
            return Err(GpioError::Edge {
                pin: 4,
                edge: "rising",
                source: io::Error::new(io::ErrorKind::NotFound, "no such pin"),
            });
        }
        if self.die_after_start {
            signal.fail(GpioError::Value {
                pin: 4,
                source: io::Error::new(io::ErrorKind::BrokenPipe, "value unreadable"),
            });
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), GpioError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Screen that remembers its state and counts presses, without sleeping.
#[derive(Clone)]
pub struct FakeScreen {
    state: Arc<Mutex<ScreenState>>,
    presses: Arc<AtomicUsize>,
    line: FakeLine,
}

impl FakeScreen {
    pub fn new(state: ScreenState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            presses: Arc::new(AtomicUsize::new(0)),
            line: FakeLine::new(),
        }
    }

    pub fn presses(&self) -> usize {
        self.presses.load(Ordering::SeqCst)
    }

    pub fn current(&self) -> ScreenState {
        *self.state.lock()
    }

    /// Makes every further press fail.
    pub fn break_line(&self) {
        self.line.break_line();
    }

    fn press(&mut self, target: ScreenState) -> Result<bool, ScreenError> {
        if *self.state.lock() == target {
            return Ok(false);
        }
        self.line.drive_low()?;
        self.line.release()?;
        self.presses.fetch_add(1, Ordering::SeqCst);
        *self.state.lock() = target;
        Ok(true)
    }
}

impl ScreenPower for FakeScreen {
    fn turn_on(&mut self) -> Result<bool, ScreenError> {
        self.press(ScreenState::On)
    }

    fn turn_off(&mut self) -> Result<bool, ScreenError> {
        self.press(ScreenState::Off)
    }

    fn state(&self) -> ScreenState {
        self.current()
    }
}

/// The log-only variant: no screen to drive.
pub fn no_screen() -> Option<&'static mut dyn ScreenPower> {
    None
}
