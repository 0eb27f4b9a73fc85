//! # pirscreen - PIR motion controlled screen
//!
//! Switches a display on and off from a passive-infrared motion sensor on a
//! single-board computer, and records motion and inactivity events to an
//! event store for later analysis.
//!
//! ## Features
//!
//! - **Motion Watching**: rising-edge interrupts coalesced into one wake per cycle
//! - **Screen Control**: emulated power-button presses with persisted on/off state
//! - **Event Logging**: best-effort `MOTION_AFTER_INACTIVITY` / `NO_MOTION_FOR` rows
//! - **Log-only Variant**: runs without a screen when none is configured
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pirscreen::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
