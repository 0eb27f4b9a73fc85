//! Convenience macros for application messaging and logging.
//!
//! In debug mode (`PIRSCREEN_DEBUG` or `RUST_LOG` set, or a log file
//! configured) every macro routes through `tracing`, so output lands in the
//! configured subscriber. Otherwise messages are printed to the console with
//! a short prefix.
//!
//! ## Macro Categories
//!
//! - **`msg_print!`**: plain message
//! - **`msg_success!`** / **`msg_info!`** / **`msg_warning!`** / **`msg_error!`**:
//!   prefixed messages at the matching tracing level
//! - **`msg_debug!`**: only emitted in debug mode
//! - **`msg_error_anyhow!`** / **`msg_bail_anyhow!`**: build or return an
//!   `anyhow::Error` from a message
//!
//! ```rust
//! use pirscreen::{msg_info, msg_warning};
//! use pirscreen::libs::messages::Message;
//!
//! msg_info!(Message::WatcherReady);
//! msg_warning!(Message::WatcherCleaningUp);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Cached debug mode detection, environment variables are checked once per run.
static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Set once a subscriber writing to a log file is installed.
static ROUTE_TO_TRACING: AtomicBool = AtomicBool::new(false);

#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    ROUTE_TO_TRACING.load(Ordering::Relaxed)
        || *DEBUG_MODE.get_or_init(|| std::env::var("PIRSCREEN_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Sends every following message through `tracing`, whatever the environment says.
pub fn route_to_tracing() {
    ROUTE_TO_TRACING.store(true, Ordering::Relaxed);
}

#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
