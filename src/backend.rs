//! Contract every database backend implements.
//!
//! The facade in [`crate::api`] only ever talks to a backend through this
//! trait, so adding a database system means implementing [`DatabaseImpl`]
//! and registering a constructor in a [`crate::registry::BackendRegistry`].

use crate::error::Result;
use crate::value::ResultSet;

/// Operations a database backend has to provide to be driven by the API.
pub trait DatabaseImpl: Send {
    /// Identifying name of the backend.
    fn name(&self) -> &'static str;

    /// Opens a connection for further requests to the database.
    ///
    /// Returns `true` when the connection is open afterwards, including when it
    /// already was.
    fn open_connection(&mut self) -> bool;

    /// Closes an opened connection.
    ///
    /// Returns `true` immediately without doing anything when no connection is
    /// open.
    fn close_connection(&mut self) -> bool;

    /// Executes a raw SQL statement on the open connection.
    ///
    /// Returns `Ok(None)` for statements that produce no result set, such as
    /// DDL or DML, and `Ok(Some(_))` for statements that produce columns even
    /// when no row matched.
    fn execute_statement(&mut self, sql: &str) -> Result<Option<ResultSet>>;

    /// Begins a transaction. Necessary before committing or rolling back.
    fn begin_transaction(&mut self) -> bool;

    /// Commits and closes the active transaction.
    ///
    /// Returns `true` without doing anything when no transaction is active.
    fn commit_transaction(&mut self) -> bool;

    /// Reverts and closes the active transaction.
    ///
    /// Returns `true` without doing anything when no transaction is active.
    fn rollback_transaction(&mut self) -> bool;

    /// Whether a connection is currently open.
    fn is_connected(&self) -> bool;

    /// Whether a transaction is active on the open connection.
    fn in_transaction(&self) -> bool;
}
