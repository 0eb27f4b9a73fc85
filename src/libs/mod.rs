//! Core library modules for pirscreen.
//!
//! ## Features
//!
//! - **Core Infrastructure**: configuration, data storage, logging, messaging
//! - **Watcher Core**: motion signal, activity tracking, screen control, event recording
//! - **Hardware**: GPIO seams and the Linux sysfs driver
//! - **Process**: the supervisor loop and signal-driven shutdown
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pirscreen::libs::signal::{MotionSignal, Wake};
//! use std::time::Duration;
//!
//! let signal = MotionSignal::new();
//! signal.set();
//! signal.set();
//! assert_eq!(signal.wait(Duration::from_secs(1)), Wake::Motion);
//! ```

pub mod activity;
pub mod config;
pub mod daemon;
pub mod data_storage;
pub mod event;
pub mod gpio;
pub mod logging;
pub mod messages;
pub mod monitor;
pub mod recorder;
pub mod screen;
pub mod signal;
#[cfg(unix)]
pub mod sysfs_gpio;
