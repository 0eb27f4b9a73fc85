use rusqlite::{Connection, Result};
use std::path::Path;

/// A single short-lived connection to the event store database.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn open(path: &Path) -> Result<Db> {
        let conn = Connection::open(path)?;
        Ok(Db { conn })
    }

    /// Closes the connection, reporting errors `Drop` would swallow.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)
    }
}
