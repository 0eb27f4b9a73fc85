use crate::db::motions::SqliteEventStore;
use crate::libs::activity::ActivityTracker;
use crate::libs::config::Config;
use crate::libs::daemon;
use crate::libs::monitor::Supervisor;
use crate::libs::recorder::EventRecorder;
use anyhow::Result;
use std::time::Instant;

/// Watches the motion sensor until the process is asked to stop.
pub async fn cmd(config: &Config) -> Result<()> {
    let supervisor = build(config)?;
    daemon::run_with_signal_handling(supervisor).await
}

/// Sets up pins, screen and store. Any hardware failure here is fatal.
#[cfg(unix)]
pub fn build(config: &Config) -> Result<Supervisor> {
    use crate::libs::messages::Message;
    use crate::libs::screen::{ScreenController, ScreenPower};
    use crate::libs::sysfs_gpio::{SysfsControlLine, SysfsMotionSource};
    use crate::{msg_error_anyhow, msg_info};

    let device = config.device.clone().unwrap_or_default();
    let sensor = config.sensor.clone().unwrap_or_default();
    let store = config.store.clone().unwrap_or_default();
    msg_info!(Message::WatcherStarting {
        screen: config.screen.is_some()
    });

    let source = SysfsMotionSource::open(sensor.pin).map_err(|e| msg_error_anyhow!(Message::GpioSetupFailed(e.to_string())))?;

    let screen: Option<Box<dyn ScreenPower>> = match &config.screen {
        Some(screen_config) => {
            let line = SysfsControlLine::open(screen_config.pin).map_err(|e| msg_error_anyhow!(Message::GpioSetupFailed(e.to_string())))?;
            Some(Box::new(ScreenController::new(line, screen_config.state_path()?)?))
        }
        None => None,
    };

    let recorder = EventRecorder::new(Box::new(SqliteEventStore::new(store.db_path()?)));
    let tracker = ActivityTracker::new(&device.name, Instant::now());
    Ok(Supervisor::new(Box::new(source), tracker, screen, recorder))
}

#[cfg(not(unix))]
pub fn build(_config: &Config) -> Result<Supervisor> {
    use crate::libs::messages::Message;
    use crate::msg_bail_anyhow;

    msg_bail_anyhow!(Message::PlatformNotSupported);
}
