use crate::libs::config::LogConfig;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::macros::route_to_tracing;
use anyhow::{anyhow, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info";

/// Installs the global `tracing` subscriber.
///
/// With a configured log file, lines are appended there without ANSI colours
/// and every `msg_*` macro is routed to it; otherwise they go to stderr.
pub fn init(log: Option<&LogConfig>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match log.and_then(|l| l.file.as_deref()) {
        Some(file) => {
            let path = DataStorage::new().resolve(file)?;
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init().map_err(|e| anyhow!(e.to_string()))?;
            // console output would bypass the file
            route_to_tracing();
            Ok(())
        }
        None => builder.with_writer(std::io::stderr).try_init().map_err(|e| anyhow!(e.to_string())),
    }
}
