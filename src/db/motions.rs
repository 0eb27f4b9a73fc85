//! Append-only `motion` table holding motion and inactivity events.
//!
//! Every append opens its own connection, inserts one row inside a
//! transaction, commits and closes. Nothing is pooled or batched, so a row
//! that fails to land is gone.
//!
//! ```rust,no_run
//! use pirscreen::db::motions::{EventStore, SqliteEventStore};
//! use pirscreen::libs::event::{MotionEvent, MotionEventKind};
//! use std::time::Duration;
//!
//! let store = SqliteEventStore::new("/var/lib/pirscreen/motion.db");
//! let event = MotionEvent::new("HDMIPi", MotionEventKind::NoMotionFor, Duration::from_secs(601));
//! store.append(&event)?;
//! # Ok::<(), pirscreen::db::motions::StoreError>(())
//! ```

use super::db::Db;
use crate::libs::event::MotionEvent;
use chrono::NaiveDateTime;
use rusqlite::params;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SCHEMA_MOTION: &str = "CREATE TABLE IF NOT EXISTS motion (
    id INTEGER NOT NULL PRIMARY KEY,
    name TEXT NOT NULL,
    event TEXT NOT NULL,
    value REAL NOT NULL,
    created_at TIMESTAMP NOT NULL,
    created_at_utc TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

const INSERT_MOTION: &str =
    "INSERT INTO motion (name, event, value, created_at, created_at_utc, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, CURRENT_TIMESTAMP)";

const SELECT_RECENT_MOTION: &str =
    "SELECT id, name, event, value, created_at, created_at_utc, updated_at FROM motion ORDER BY id DESC LIMIT ?1";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("cannot connect to event store: {0}")]
    ConnectionFailed(String),

    #[error("cannot write event: {0}")]
    WriteFailed(String),

    #[error("cannot commit event: {0}")]
    CommitFailed(String),
}

/// Destination for motion events.
pub trait EventStore: Send {
    /// Writes one event, opening and closing whatever connection it needs.
    fn append(&self, event: &MotionEvent) -> Result<(), StoreError>;
}

/// A row read back from the `motion` table.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionRow {
    pub id: i64,
    pub name: String,
    pub event: String,
    pub value: f64,
    pub created_at: NaiveDateTime,
    pub created_at_utc: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct SqliteEventStore {
    path: PathBuf,
}

impl SqliteEventStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Most recent rows first.
    pub fn recent(&self, limit: usize) -> Result<Vec<MotionRow>, StoreError> {
        let db = Db::open(&self.path).map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
        db.conn.execute(SCHEMA_MOTION, []).map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let rows = {
            let mut stmt = db.conn.prepare(SELECT_RECENT_MOTION).map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
            let row_iter = stmt
                .query_map(params![limit as i64], |row| {
                    Ok(MotionRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        event: row.get(2)?,
                        value: row.get(3)?,
                        created_at: row.get(4)?,
                        created_at_utc: row.get(5)?,
                        updated_at: row.get(6)?,
                    })
                })
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

            let mut rows = vec![];
            for row in row_iter {
                rows.push(row.map_err(|e| StoreError::ConnectionFailed(e.to_string()))?);
            }
            rows
        };

        Ok(rows)
    }
}

impl EventStore for SqliteEventStore {
    fn append(&self, event: &MotionEvent) -> Result<(), StoreError> {
        let mut db = Db::open(&self.path).map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
        db.conn.execute(SCHEMA_MOTION, []).map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let transaction = db.conn.transaction().map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        transaction
            .execute(
                INSERT_MOTION,
                params![
                    event.device_name(),
                    event.kind().as_str(),
                    event.duration_seconds(),
                    event.local_time().naive_local(),
                    event.utc_time().naive_utc(),
                ],
            )
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        transaction.commit().map_err(|e| StoreError::CommitFailed(e.to_string()))?;

        db.close().map_err(|e| StoreError::CommitFailed(e.to_string()))
    }
}
