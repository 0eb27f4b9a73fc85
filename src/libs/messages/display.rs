//! Display implementation for pirscreen messages.
//!
//! All message text is defined here, one arm per `Message` variant, so the
//! rest of the code never formats user-facing strings itself.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigLoaded => "Configuration loaded".to_string(),
            Message::ConfigParseError(e) => format!("Failed to parse configuration: {}", e),
            Message::ConfigExists(path) => format!("Configuration already exists at {}, use --force to overwrite", path),

            // === SCREEN MESSAGES ===
            Message::ScreenStateLoaded(on) => format!("Screen state loaded: {}", if *on { "on" } else { "off" }),
            Message::ScreenStateMissing(path) => format!("No screen state at {}, assuming the screen is on", path),
            Message::ScreenStateUnreadable(e) => format!("Unable to read screen state ({}), assuming the screen is on", e),
            Message::ScreenTurningOn => "Turning on the screen.".to_string(),
            Message::ScreenTurningOff => "Turning off the screen.".to_string(),
            Message::ScreenToggled(on) => format!("Screen toggled, now {}", if *on { "on" } else { "off" }),

            // === ACTIVITY MESSAGES ===
            Message::MotionDetected => "Motion detected.".to_string(),
            Message::InactivityDetected => "Inactivity detected.".to_string(),

            // === EVENT STORE MESSAGES ===
            Message::SavingEvent(row) => format!("Saving to database: {}", row),
            Message::EventSaveFailed(e) => format!("Unable to commit to database: {}", e),
            Message::EventDropped(row) => format!("Unable to save {}", row),
            Message::NoEventsRecorded => "No motion events recorded yet".to_string(),
            Message::EventRow {
                created_at,
                event,
                seconds,
                name,
            } => format!("{}  {:<24} {:>10.1}s  {}", created_at, event, seconds, name),

            // === GPIO MESSAGES ===
            Message::GpioExported(pin) => format!("GPIO {} exported", pin),
            Message::GpioSetupFailed(e) => format!("GPIO setup failed: {}", e),
            Message::GpioCleanupFailed(e) => format!("GPIO cleanup failed: {}", e),
            Message::EdgeWatcherFailed(e) => format!("Motion edge watcher stopped: {}", e),

            // === WATCHER MESSAGES ===
            Message::WatcherStarting { screen } => {
                if *screen {
                    "PIR controlled screen (CTRL+C to exit).".to_string()
                } else {
                    "PIR (CTRL+C to exit).".to_string()
                }
            }
            Message::WatcherReady => "Ready.".to_string(),
            Message::WatcherReceivedSigterm => "Received SIGTERM, shutting down".to_string(),
            Message::WatcherReceivedSigint => "Interrupt Ctrl-C".to_string(),
            Message::WatcherReceivedCtrlC => "Interrupt Ctrl-C".to_string(),
            Message::WatcherCtrlCListenFailed(e) => format!("Failed to listen for Ctrl-C: {}", e),
            Message::WatcherSignalHandlingNotSupported => "Signal handling is not supported on this platform".to_string(),
            Message::WatcherCleaningUp => "Cleaning up".to_string(),
            Message::WatcherExitedNormally => "Watcher exited normally".to_string(),
            Message::WatcherShuttingDown => "Watcher shutting down".to_string(),
            Message::WatcherError(e) => format!("Watcher error: {}", e),
            Message::WatcherTaskPanicked(e) => format!("Watcher task panicked: {}", e),

            // === ERROR MESSAGES ===
            Message::FailedToCreateSigtermHandler => "Failed to create SIGTERM handler".to_string(),
            Message::FailedToCreateSigintHandler => "Failed to create SIGINT handler".to_string(),
            Message::PlatformNotSupported => "GPIO access is only supported on Linux".to_string(),
        };
        write!(f, "{}", text)
    }
}
