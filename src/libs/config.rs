//! Configuration for the pirscreen watcher.
//!
//! Settings are stored as pretty-printed JSON in `config.json` inside the
//! platform data directory (see [`DataStorage`]). Every section is optional so
//! a fresh device runs with no file at all: a missing file reads as
//! [`Config::default`].
//!
//! The presence of the `screen` section selects the screen-equipped variant;
//! without it the watcher only logs motion and inactivity events.
//!
//! Timing thresholds are not configurable, they live as constants next to the
//! code that uses them.
//!
//! ```rust,no_run
//! use pirscreen::libs::config::Config;
//!
//! let config = Config::read()?;
//! let device = config.device.unwrap_or_default();
//! println!("Device: {}", device.name);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default file name of the persisted screen state.
pub const SCREEN_STATE_FILE_NAME: &str = "screen_state";

/// Default file name of the SQLite event store.
pub const STORE_FILE_NAME: &str = "motion.db";

/// Identity of this device in the event store.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DeviceConfig {
    /// Value written to the `name` column of every motion row.
    pub name: String,
}

/// Motion sensor wiring.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SensorConfig {
    /// GPIO line (BCM numbering) the PIR output is connected to.
    pub pin: u32,
}

/// Screen power button wiring and state persistence.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScreenConfig {
    /// GPIO line (BCM numbering) wired to the display's power button.
    pub pin: u32,

    /// File holding the `on`/`off` token. Relative names resolve inside the
    /// data directory.
    pub state_file: String,
}

/// Event store location.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StoreConfig {
    /// Database file. Relative names resolve inside the data directory; an
    /// absolute path may point at a mounted network share.
    pub path: String,
}

/// Log output.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct LogConfig {
    /// When set, log lines are appended to this file instead of stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor: Option<SensorConfig>,

    /// Screen-equipped variant when present, log-only otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<ScreenConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<LogConfig>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig { name: "RaspberryPi".to_string() }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig { pin: 4 }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        ScreenConfig {
            pin: 25,
            state_file: SCREEN_STATE_FILE_NAME.to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: STORE_FILE_NAME.to_string(),
        }
    }
}

impl ScreenConfig {
    pub fn state_path(&self) -> Result<PathBuf> {
        Ok(DataStorage::new().resolve(&self.state_file)?)
    }
}

impl StoreConfig {
    pub fn db_path(&self) -> Result<PathBuf> {
        Ok(DataStorage::new().resolve(&self.path)?)
    }
}

impl Config {
    /// Reads `config.json`, falling back to defaults when the file does not exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str).map_err(|e| msg_error_anyhow!(Message::ConfigParseError(e.to_string())))?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON and returns the file path.
    pub fn save(&self) -> Result<PathBuf> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(&config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(config_file_path)
    }

    /// A fully populated screen-variant configuration, used by `init`.
    pub fn template() -> Self {
        Config {
            device: Some(DeviceConfig { name: "HDMIPi".to_string() }),
            sensor: Some(SensorConfig::default()),
            screen: Some(ScreenConfig::default()),
            store: Some(StoreConfig::default()),
            log: Some(LogConfig::default()),
        }
    }
}
