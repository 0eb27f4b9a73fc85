//! Screen power control through an emulated power-button press.
//!
//! The display has a momentary power button, not a power level input, so
//! the only action is [`ScreenController::toggle`]: pull the button line low
//! for [`SETTLE_TIME`], let go, and flip the remembered state. The state is
//! persisted after every press and restored at startup without pressing
//! anything, so a restart never changes what the screen shows.
//!
//! ## Persisted state policy
//!
//! - Missing or unreadable state file: assume the screen is on and write
//!   `on` right away, so memory and disk agree from the first moment.
//! - State file holding anything but `on`/`off`: [`ScreenError::Corrupt`],
//!   the controller is not built.

use crate::libs::gpio::{ControlLine, GpioError};
use crate::libs::messages::Message;
use crate::{msg_info, msg_warning};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// How long the button line is held low for one press.
pub const SETTLE_TIME: Duration = Duration::from_millis(200);

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Gpio(#[from] GpioError),

    #[error("failed to persist screen state to {path}: {source}")]
    Persist { path: PathBuf, source: io::Error },

    #[error("screen state file {path} contains '{token}', expected 'on' or 'off'")]
    Corrupt { path: PathBuf, token: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    On,
    Off,
}

impl ScreenState {
    pub fn as_str(self) -> &'static str {
        match self {
            ScreenState::On => "on",
            ScreenState::Off => "off",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "on" => Some(ScreenState::On),
            "off" => Some(ScreenState::Off),
            _ => None,
        }
    }

    pub fn is_on(self) -> bool {
        self == ScreenState::On
    }

    fn flipped(self) -> Self {
        match self {
            ScreenState::On => ScreenState::Off,
            ScreenState::Off => ScreenState::On,
        }
    }
}

impl fmt::Display for ScreenState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the activity tracker needs from a screen.
pub trait ScreenPower: Send {
    /// Presses the button if the screen is off. Returns whether it pressed.
    fn turn_on(&mut self) -> Result<bool, ScreenError>;

    /// Presses the button if the screen is on. Returns whether it pressed.
    fn turn_off(&mut self) -> Result<bool, ScreenError>;

    fn state(&self) -> ScreenState;
}

pub struct ScreenController<L: ControlLine> {
    line: L,
    state: ScreenState,
    state_path: PathBuf,
}

impl<L: ControlLine> ScreenController<L> {
    /// Restores the persisted state. Never presses the button.
    pub fn new(line: L, state_path: impl Into<PathBuf>) -> Result<Self, ScreenError> {
        let state_path = state_path.into();
        let state = match fs::read_to_string(&state_path) {
            Ok(content) => {
                let token = content.trim();
                ScreenState::parse(token).ok_or_else(|| ScreenError::Corrupt {
                    path: state_path.clone(),
                    token: token.to_string(),
                })?
            }
            Err(e) => {
                if e.kind() == io::ErrorKind::NotFound {
                    msg_warning!(Message::ScreenStateMissing(state_path.display().to_string()));
                } else {
                    msg_warning!(Message::ScreenStateUnreadable(e.to_string()));
                }
                write_state(&state_path, ScreenState::On)?;
                ScreenState::On
            }
        };
        msg_info!(Message::ScreenStateLoaded(state.is_on()));

        Ok(Self { line, state, state_path })
    }

    /// One button press: line low for [`SETTLE_TIME`], released, state flipped and persisted.
    pub fn toggle(&mut self) -> Result<(), ScreenError> {
        self.line.drive_low()?;
        thread::sleep(SETTLE_TIME);
        self.line.release()?;

        self.state = self.state.flipped();
        write_state(&self.state_path, self.state)?;
        msg_info!(Message::ScreenToggled(self.state.is_on()));
        Ok(())
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }
}

impl<L: ControlLine> ScreenPower for ScreenController<L> {
    fn turn_on(&mut self) -> Result<bool, ScreenError> {
        if self.state.is_on() {
            return Ok(false);
        }
        msg_info!(Message::ScreenTurningOn);
        self.toggle()?;
        Ok(true)
    }

    fn turn_off(&mut self) -> Result<bool, ScreenError> {
        if !self.state.is_on() {
            return Ok(false);
        }
        msg_info!(Message::ScreenTurningOff);
        self.toggle()?;
        Ok(true)
    }

    fn state(&self) -> ScreenState {
        self.state
    }
}

fn write_state(path: &Path, state: ScreenState) -> Result<(), ScreenError> {
    fs::write(path, state.as_str()).map_err(|source| ScreenError::Persist {
        path: path.to_path_buf(),
        source,
    })
}
