use crate::libs::config::Config;
use anyhow::Result;

/// Presses the screen power button once and exits, bypassing the watcher.
///
/// The persisted state flips with the press, so a following `watch` run
/// starts from the right assumption.
#[cfg(unix)]
pub fn cmd(config: &Config) -> Result<()> {
    use crate::libs::messages::Message;
    use crate::libs::screen::ScreenController;
    use crate::libs::sysfs_gpio::SysfsControlLine;
    use crate::msg_error_anyhow;

    let screen_config = config.screen.clone().unwrap_or_default();
    let line = SysfsControlLine::open(screen_config.pin).map_err(|e| msg_error_anyhow!(Message::GpioSetupFailed(e.to_string())))?;
    let mut screen = ScreenController::new(line, screen_config.state_path()?)?;
    screen.toggle()?;
    Ok(())
}

#[cfg(not(unix))]
pub fn cmd(_config: &Config) -> Result<()> {
    use crate::libs::messages::Message;
    use crate::msg_bail_anyhow;

    msg_bail_anyhow!(Message::PlatformNotSupported);
}
