//! Shared storage handle and unit-of-work execution.
//!
//! # Responsibility
//! - Own the single SQLite connection used by request handlers.
//! - Run each unit of work inside its own transaction.
//!
//! # Invariants
//! - A unit of work commits only when its closure returns `Ok`.
//! - Errors and panics inside a unit of work roll the transaction back and
//!   release the connection for the next caller.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Explicitly constructed storage handle shared by request handlers.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens (and migrates) a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Runs `work` inside one transaction and commits on success.
    ///
    /// Units of work are serialized: only one runs at a time.
    pub fn unit_of_work<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<DbError>,
    {
        // A poisoned lock only means an earlier unit of work panicked; its
        // transaction was rolled back when it unwound.
        let mut conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let tx = conn.transaction().map_err(DbError::from)?;
        let value = work(&*tx)?;
        tx.commit().map_err(DbError::from)?;
        Ok(value)
    }
}
