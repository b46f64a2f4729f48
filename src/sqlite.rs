//! SQLite backend implementing [`DatabaseImpl`] with rusqlite.

use rusqlite::{Batch, Connection, Statement};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::backend::DatabaseImpl;
use crate::config::DatabaseConfig;
use crate::error::{DatabaseError, Result};
use crate::value::{ResultSet, Value};

/// Identifier selecting this backend, compared case-insensitively.
pub const SQLITE3: &str = "SQLITE3";

/// Short alias accepted for [`SQLITE3`].
pub const SQLITE: &str = "SQLITE";

/// SQLite backend on top of rusqlite.
///
/// Holds at most one connection. Transaction state is read from SQLite's
/// autocommit flag, so a `BEGIN` issued through [`DatabaseImpl::execute_statement`]
/// is seen by commit and rollback as well.
#[derive(Debug, Default)]
pub struct Sqlite3Impl {
    /// Database file; `None` means a private in-memory database
    path: Option<PathBuf>,
    connection: Option<Connection>,
}

impl Sqlite3Impl {
    /// Create a new SQLite backend from the given config. No connection is opened.
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            path: config.path.clone(),
            connection: None,
        }
    }

    /// Constructor registered for [`SQLITE3`] and [`SQLITE`].
    pub fn create(config: &DatabaseConfig) -> Box<dyn DatabaseImpl> {
        Box::new(Self::new(config))
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        match &self.path {
            Some(path) => Connection::open(path),
            None => Connection::open_in_memory(),
        }
    }

    /// Run a transaction control statement if a transaction is active.
    fn end_transaction(&mut self, sql: &str) -> bool {
        let Some(conn) = self.connection.as_ref() else {
            return true;
        };
        if conn.is_autocommit() {
            debug!(statement = sql, "no active transaction");
            return true;
        }
        match conn.execute_batch(sql) {
            Ok(()) => {
                debug!(statement = sql, "transaction closed");
                true
            }
            Err(e) => {
                warn!(statement = sql, error = %e, "failed to close transaction");
                false
            }
        }
    }
}

impl DatabaseImpl for Sqlite3Impl {
    fn name(&self) -> &'static str {
        "SQLite3"
    }

    fn open_connection(&mut self) -> bool {
        if self.connection.is_some() {
            debug!("sqlite connection already open");
            return true;
        }
        match self.connect() {
            Ok(conn) => {
                info!(path = ?self.path, "opened sqlite connection");
                self.connection = Some(conn);
                true
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "failed to open sqlite connection");
                false
            }
        }
    }

    fn close_connection(&mut self) -> bool {
        let Some(conn) = self.connection.take() else {
            return true;
        };
        match conn.close() {
            Ok(()) => {
                info!(path = ?self.path, "closed sqlite connection");
                true
            }
            Err((conn, e)) => {
                warn!(error = %e, "failed to close sqlite connection");
                self.connection = Some(conn);
                false
            }
        }
    }

    /// Runs every statement in `sql` in order and returns the result of the
    /// last one. Empty and comment-only input yields `Ok(None)`. Execution
    /// stops at the first failing statement; earlier ones stay applied unless
    /// a transaction is rolled back.
    fn execute_statement(&mut self, sql: &str) -> Result<Option<ResultSet>> {
        let conn = self.connection.as_ref().ok_or(DatabaseError::NotConnected)?;
        let mut batch = Batch::new(conn, sql);
        let mut result = None;
        while let Some(mut stmt) = batch.next()? {
            result = run_statement(&mut stmt)?;
        }
        Ok(result)
    }

    fn begin_transaction(&mut self) -> bool {
        let Some(conn) = self.connection.as_ref() else {
            warn!("cannot begin transaction without an open connection");
            return false;
        };
        match conn.execute_batch("BEGIN") {
            Ok(()) => {
                debug!("transaction started");
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to begin transaction");
                false
            }
        }
    }

    fn commit_transaction(&mut self) -> bool {
        self.end_transaction("COMMIT")
    }

    fn rollback_transaction(&mut self) -> bool {
        self.end_transaction("ROLLBACK")
    }

    fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn in_transaction(&self) -> bool {
        self.connection
            .as_ref()
            .is_some_and(|conn| !conn.is_autocommit())
    }
}

fn run_statement(stmt: &mut Statement<'_>) -> Result<Option<ResultSet>> {
    if stmt.column_count() == 0 {
        let changed = stmt.execute([])?;
        debug!(changed, "statement executed");
        return Ok(None);
    }

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();
    let mut result = ResultSet::new(columns);
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(width);
        for idx in 0..width {
            values.push(Value::from(row.get_ref(idx)?));
        }
        result.rows.push(values);
    }
    debug!(rows = result.len(), "query executed");
    Ok(Some(result))
}
