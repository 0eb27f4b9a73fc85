pub mod events;
pub mod init;
pub mod toggle;
pub mod watch;

use crate::libs::config::Config;
use crate::libs::logging;
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Watch the motion sensor and drive the screen (default)")]
    Watch,
    #[command(about = "Press the screen power button once and exit")]
    Toggle,
    #[command(about = "Write a default configuration file")]
    Init(init::InitArgs),
    #[command(about = "Show recently recorded motion events")]
    Events(events::EventsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let command = Self::parse().command.unwrap_or(Commands::Watch);

        // init must work even when the existing config.json is broken
        let config = match command {
            Commands::Init(_) => {
                logging::init(None)?;
                Config::default()
            }
            _ => {
                let config = Config::read()?;
                logging::init(config.log.as_ref())?;
                msg_debug!(Message::ConfigLoaded);
                config
            }
        };

        match command {
            Commands::Watch => watch::cmd(&config).await,
            Commands::Toggle => toggle::cmd(&config),
            Commands::Events(args) => events::cmd(&config, args),
            Commands::Init(args) => init::cmd(args),
        }
    }
}
