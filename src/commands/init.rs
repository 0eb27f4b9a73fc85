//! Writes a starter `config.json`.
//!
//! The file is fully populated with defaults so every setting is visible and
//! can be edited in place.

use crate::libs::config::{Config, DeviceConfig, CONFIG_FILE_NAME};
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    force: bool,

    /// Configure a log-only device without a screen
    #[arg(long)]
    no_screen: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    let config_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
    if config_path.exists() && !init_args.force {
        msg_bail_anyhow!(Message::ConfigExists(config_path.display().to_string()));
    }

    let mut config = Config::template();
    if init_args.no_screen {
        config.screen = None;
        config.device = Some(DeviceConfig::default());
    }

    let saved = config.save()?;
    msg_success!(Message::ConfigSaved(saved.display().to_string()));
    Ok(())
}
