//! GPIO driver over the Linux sysfs interface (`/sys/class/gpio`).
//!
//! A pin is exported when it is opened and unexported when it is dropped,
//! which gives the same end state as a global GPIO cleanup on exit.
//!
//! Rising edges are delivered by a dedicated thread that `poll(2)`s the
//! pin's `value` file for `POLLPRI`. The thread wakes every
//! [`WATCH_POLL_MS`] to check for a stop request. If reading the pin fails
//! the thread fails the [`MotionSignal`] and exits.

use crate::libs::gpio::{ControlLine, GpioError, MotionSource};
use crate::libs::messages::Message;
use crate::libs::signal::MotionSignal;
use crate::{msg_debug, msg_error};
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags};
use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::os::fd::AsFd;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// Upper bound on how long a stop request waits for the edge thread.
const WATCH_POLL_MS: u16 = 500;

/// udev may take a moment to fix permissions on a freshly exported pin.
const EXPORT_SETTLE_ATTEMPTS: u32 = 20;
const EXPORT_SETTLE_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    /// Output, initialised low in the same write so the line never glitches high.
    OutLow,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::OutLow => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    None,
    Rising,
}

impl Edge {
    fn as_str(self) -> &'static str {
        match self {
            Edge::None => "none",
            Edge::Rising => "rising",
        }
    }
}

/// One exported sysfs pin.
#[derive(Debug)]
pub struct SysfsPin {
    pin: u32,
    root: PathBuf,
    exported: bool,
}

impl SysfsPin {
    pub fn export(pin: u32) -> Result<Self, GpioError> {
        Self::export_at(Path::new(SYSFS_GPIO_ROOT), pin)
    }

    /// Exports `pin` under an alternative sysfs root.
    pub fn export_at(root: &Path, pin: u32) -> Result<Self, GpioError> {
        let gpio = Self {
            pin,
            root: root.to_path_buf(),
            exported: true,
        };
        if !gpio.dir().exists() {
            fs::write(root.join("export"), pin.to_string()).map_err(|source| GpioError::Export { pin, source })?;
            gpio.wait_until_ready();
        }
        msg_debug!(Message::GpioExported(pin));
        Ok(gpio)
    }

    pub fn pin(&self) -> u32 {
        self.pin
    }

    fn dir(&self) -> PathBuf {
        self.root.join(format!("gpio{}", self.pin))
    }

    pub fn value_path(&self) -> PathBuf {
        self.dir().join("value")
    }

    fn wait_until_ready(&self) {
        let direction = self.dir().join("direction");
        for _ in 0..EXPORT_SETTLE_ATTEMPTS {
            let writable = fs::metadata(&direction).map(|m| !m.permissions().readonly()).unwrap_or(false);
            if writable {
                return;
            }
            thread::sleep(EXPORT_SETTLE_DELAY);
        }
    }

    pub fn set_direction(&self, direction: Direction) -> Result<(), GpioError> {
        fs::write(self.dir().join("direction"), direction.as_str()).map_err(|source| GpioError::Direction {
            pin: self.pin,
            direction: direction.as_str(),
            source,
        })
    }

    pub fn set_edge(&self, edge: Edge) -> Result<(), GpioError> {
        fs::write(self.dir().join("edge"), edge.as_str()).map_err(|source| GpioError::Edge {
            pin: self.pin,
            edge: edge.as_str(),
            source,
        })
    }

    /// Unexports the pin. Only the first call touches sysfs.
    pub fn unexport(&mut self) -> Result<(), GpioError> {
        if !self.exported {
            return Ok(());
        }
        self.exported = false;
        fs::write(self.root.join("unexport"), self.pin.to_string()).map_err(|source| GpioError::Unexport { pin: self.pin, source })
    }
}

impl Drop for SysfsPin {
    fn drop(&mut self) {
        if let Err(e) = self.unexport() {
            msg_error!(Message::GpioCleanupFailed(e.to_string()));
        }
    }
}

/// Power-button line: passive input at rest, pulled low while pressed.
#[derive(Debug)]
pub struct SysfsControlLine {
    gpio: SysfsPin,
}

impl SysfsControlLine {
    pub fn open(pin: u32) -> Result<Self, GpioError> {
        Self::open_at(Path::new(SYSFS_GPIO_ROOT), pin)
    }

    pub fn open_at(root: &Path, pin: u32) -> Result<Self, GpioError> {
        let gpio = SysfsPin::export_at(root, pin)?;
        gpio.set_direction(Direction::In)?;
        Ok(Self { gpio })
    }
}

impl ControlLine for SysfsControlLine {
    fn drive_low(&mut self) -> Result<(), GpioError> {
        self.gpio.set_direction(Direction::OutLow)
    }

    fn release(&mut self) -> Result<(), GpioError> {
        self.gpio.set_direction(Direction::In)
    }
}

struct EdgeWatcher {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// PIR input with rising-edge interrupts.
pub struct SysfsMotionSource {
    gpio: SysfsPin,
    watcher: Option<EdgeWatcher>,
}

impl SysfsMotionSource {
    pub fn open(pin: u32) -> Result<Self, GpioError> {
        Self::open_at(Path::new(SYSFS_GPIO_ROOT), pin)
    }

    pub fn open_at(root: &Path, pin: u32) -> Result<Self, GpioError> {
        let gpio = SysfsPin::export_at(root, pin)?;
        gpio.set_direction(Direction::In)?;
        Ok(Self { gpio, watcher: None })
    }
}

impl MotionSource for SysfsMotionSource {
    fn start(&mut self, signal: Arc<MotionSignal>) -> Result<(), GpioError> {
        if self.watcher.is_some() {
            return Ok(());
        }
        let pin = self.gpio.pin();
        self.gpio.set_edge(Edge::Rising)?;

        let mut value = File::open(self.gpio.value_path()).map_err(|source| GpioError::Value { pin, source })?;
        // sysfs reports the current level as pending until it has been read once.
        let mut level = String::new();
        value.read_to_string(&mut level).map_err(|source| GpioError::Value { pin, source })?;

        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = stop.clone();
        let handle = thread::Builder::new()
            .name(format!("gpio{}-edges", pin))
            .spawn(move || watch_edges(pin, value, signal, thread_stop))
            .map_err(|e| GpioError::Watcher { pin, reason: e.to_string() })?;

        self.watcher = Some(EdgeWatcher { stop, handle });
        Ok(())
    }

    fn stop(&mut self) -> Result<(), GpioError> {
        if let Some(watcher) = self.watcher.take() {
            watcher.stop.store(true, Ordering::SeqCst);
            if watcher.handle.join().is_err() {
                msg_error!(Message::EdgeWatcherFailed("edge thread panicked".to_string()));
            }
            self.gpio.set_edge(Edge::None)?;
        }
        self.gpio.unexport()
    }
}

impl Drop for SysfsMotionSource {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            msg_error!(Message::GpioCleanupFailed(e.to_string()));
        }
    }
}

fn watch_edges(pin: u32, mut value: File, signal: Arc<MotionSignal>, stop: Arc<AtomicBool>) {
    let mut level = String::new();
    while !stop.load(Ordering::SeqCst) {
        let ready = {
            let mut fds = [PollFd::new(value.as_fd(), PollFlags::POLLPRI | PollFlags::POLLERR)];
            poll(&mut fds, WATCH_POLL_MS)
        };
        match ready {
            Ok(0) => continue,
            Ok(_) => {
                level.clear();
                let rearmed = value.seek(SeekFrom::Start(0)).and_then(|_| value.read_to_string(&mut level));
                if let Err(e) = rearmed {
                    give_up(&signal, GpioError::Value { pin, source: e });
                    return;
                }
                signal.set();
            }
            Err(Errno::EINTR) => continue,
            Err(e) => {
                give_up(&signal, GpioError::Watcher { pin, reason: e.to_string() });
                return;
            }
        }
    }
}

/// No further edges will be delivered; the watcher loop must not keep waiting for them.
fn give_up(signal: &MotionSignal, error: GpioError) {
    msg_error!(Message::EdgeWatcherFailed(error.to_string()));
    signal.fail(error);
}
