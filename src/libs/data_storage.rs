use serde::Deserialize;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "pirscreen";

/// Platform data directory holding the config, the screen state and the
/// default event store.
#[derive(Deserialize, Clone, Debug)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        let base_path = Path::new(&base_path).join(APP_NAME);

        Self { base_path }
    }

    /// Resolves `file_name` inside the data directory, creating the directory on first use.
    pub fn get_path(&self, file_name: &str) -> io::Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }

    /// Like `get_path`, but an absolute `file_name` is returned unchanged.
    pub fn resolve(&self, file_name: &str) -> io::Result<PathBuf> {
        let path = Path::new(file_name);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        self.get_path(file_name)
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}
