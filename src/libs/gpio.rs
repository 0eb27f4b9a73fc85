//! Hardware seams between the watcher and the GPIO driver.
//!
//! The watcher only needs two capabilities: a control line it can pull low
//! and let go of (the screen's power button), and a source of rising edges
//! that raises a [`MotionSignal`]. Both are traits so the core runs against
//! fakes in tests and against [`crate::libs::sysfs_gpio`] on a device.

use crate::libs::signal::MotionSignal;
use std::io;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GpioError {
    #[error("failed to export GPIO {pin}: {source}")]
    Export { pin: u32, source: io::Error },

    #[error("failed to unexport GPIO {pin}: {source}")]
    Unexport { pin: u32, source: io::Error },

    #[error("failed to set direction of GPIO {pin} to '{direction}': {source}")]
    Direction { pin: u32, direction: &'static str, source: io::Error },

    #[error("failed to set edge of GPIO {pin} to '{edge}': {source}")]
    Edge { pin: u32, edge: &'static str, source: io::Error },

    #[error("failed to access value of GPIO {pin}: {source}")]
    Value { pin: u32, source: io::Error },

    #[error("edge watcher for GPIO {pin} failed: {reason}")]
    Watcher { pin: u32, reason: String },
}

/// A line that idles as a passive input and can be pulled active-low.
pub trait ControlLine: Send {
    /// Switches the line to an output driven low.
    fn drive_low(&mut self) -> Result<(), GpioError>;

    /// Switches the line back to a passive input so external hardware keeps control.
    fn release(&mut self) -> Result<(), GpioError>;
}

/// Rising-edge interrupt registration for the motion sensor.
pub trait MotionSource: Send {
    /// Starts delivering edges to `signal`. The interrupt context must do
    /// nothing but [`MotionSignal::set`].
    fn start(&mut self, signal: Arc<MotionSignal>) -> Result<(), GpioError>;

    /// Stops edge delivery and releases the pin. Calling it again is a no-op.
    fn stop(&mut self) -> Result<(), GpioError>;
}

impl<T: ControlLine + ?Sized> ControlLine for Box<T> {
    fn drive_low(&mut self) -> Result<(), GpioError> {
        (**self).drive_low()
    }

    fn release(&mut self) -> Result<(), GpioError> {
        (**self).release()
    }
}

impl<T: MotionSource + ?Sized> MotionSource for Box<T> {
    fn start(&mut self, signal: Arc<MotionSignal>) -> Result<(), GpioError> {
        (**self).start(signal)
    }

    fn stop(&mut self) -> Result<(), GpioError> {
        (**self).stop()
    }
}
