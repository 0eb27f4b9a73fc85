//! Lists recently recorded motion and inactivity events.

use crate::db::motions::SqliteEventStore;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct EventsArgs {
    /// Number of events to show, newest last
    #[arg(short, long, default_value_t = 20)]
    limit: usize,
}

pub fn cmd(config: &Config, events_args: EventsArgs) -> Result<()> {
    let store_config = config.store.clone().unwrap_or_default();
    let store = SqliteEventStore::new(store_config.db_path()?);
    let rows = store.recent(events_args.limit)?;

    if rows.is_empty() {
        msg_info!(Message::NoEventsRecorded);
        return Ok(());
    }

    for row in rows.iter().rev() {
        msg_print!(Message::EventRow {
            created_at: row.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            event: row.event.clone(),
            seconds: row.value,
            name: row.name.clone(),
        });
    }
    Ok(())
}
