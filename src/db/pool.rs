//! SQLite connection wrapper (lightweight for CLI usage).

use rusqlite::{Connection, Result};
use std::path::Path;

use crate::db::watch::ChangeFeed;

pub struct DbPool {
    pub conn: Connection,
    /// In-process change notifications; every committed mutation goes
    /// through [`ChangeFeed::emit`].
    pub feed: ChangeFeed,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn,
            feed: ChangeFeed::new(),
        })
    }

    /// Helper to execute a closure with a mutable connection reference.
    pub fn with_conn<F, T>(&mut self, func: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        func(&mut self.conn)
    }

    /// SQLite's connection-global change counter. It moves whenever any
    /// connection (this process or another) commits to the database, which
    /// is what the watch loop polls.
    pub fn data_version(&self) -> Result<i64> {
        self.conn
            .query_row("PRAGMA data_version", [], |row| row.get(0))
    }
}
