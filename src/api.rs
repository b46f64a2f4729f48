//! Entry point for accessing the database connection layer.

use tracing::info;

use crate::backend::DatabaseImpl;
use crate::config::DatabaseConfig;
use crate::error::{DatabaseError, Result};
use crate::registry::BackendRegistry;
use crate::value::ResultSet;

/// Facade owning at most one database implementation.
///
/// The implementation is created from a [`DatabaseConfig`] and stays bound
/// for the lifetime of the facade. Every connection and transaction operation
/// is forwarded to it unchanged.
///
/// # Panics
///
/// The forwarding operations panic when no implementation has been created.
/// Build the facade with [`DatabaseApi::from_config`] to avoid that state.
pub struct DatabaseApi {
    registry: BackendRegistry,
    current: Option<Box<dyn DatabaseImpl>>,
}

impl DatabaseApi {
    /// An unbound facade using the default backend registry.
    pub fn new() -> Self {
        Self::with_registry(BackendRegistry::default())
    }

    fn with_registry(registry: BackendRegistry) -> Self {
        Self {
            registry,
            current: None,
        }
    }

    /// Create a facade and bind the implementation selected by `config`.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::from_registry(BackendRegistry::default(), config)
    }

    /// Like [`DatabaseApi::from_config`], resolving the system through `registry`.
    pub fn from_registry(registry: BackendRegistry, config: &DatabaseConfig) -> Result<Self> {
        let mut api = Self::with_registry(registry);
        api.create_implementation(config)?;
        Ok(api)
    }

    pub fn open_connection(&mut self) -> bool {
        self.bound().open_connection()
    }

    pub fn close_connection(&mut self) -> bool {
        self.bound().close_connection()
    }

    pub fn execute_statement(&mut self, sql: &str) -> Result<Option<ResultSet>> {
        self.bound().execute_statement(sql)
    }

    pub fn begin_transaction(&mut self) -> bool {
        self.bound().begin_transaction()
    }

    pub fn commit_transaction(&mut self) -> bool {
        self.bound().commit_transaction()
    }

    pub fn rollback_transaction(&mut self) -> bool {
        self.bound().rollback_transaction()
    }

    pub fn is_connected(&self) -> bool {
        self.current.as_ref().is_some_and(|db| db.is_connected())
    }

    pub fn in_transaction(&self) -> bool {
        self.current.as_ref().is_some_and(|db| db.in_transaction())
    }

    pub fn is_bound(&self) -> bool {
        self.current.is_some()
    }

    /// Name of the current implementation, e.g. to decide which SQL dialect
    /// can be used.
    pub fn implementation_name(&self) -> Result<&'static str> {
        self.current
            .as_ref()
            .map(|db| db.name())
            .ok_or(DatabaseError::InvalidState(
                "please create the database implementation first",
            ))
    }

    /// Create the implementation of the database system named in `config`.
    ///
    /// Calling this again replaces the bound implementation; the previous one
    /// is dropped together with its connection.
    pub(crate) fn create_implementation(&mut self, config: &DatabaseConfig) -> Result<()> {
        let backend = self.registry.create(config)?;
        if let Some(previous) = &self.current {
            info!(previous = previous.name(), "rebinding database implementation");
        }
        info!(backend = backend.name(), path = ?config.path, "database implementation bound");
        self.current = Some(backend);
        Ok(())
    }

    fn bound(&mut self) -> &mut dyn DatabaseImpl {
        match self.current.as_deref_mut() {
            Some(db) => db,
            None => panic!("database implementation has not been created"),
        }
    }
}

impl Default for DatabaseApi {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DatabaseApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseApi")
            .field("implementation", &self.current.as_ref().map(|db| db.name()))
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(system: Option<&str>) -> Result<DatabaseApi> {
        let mut api = DatabaseApi::new();
        let config = DatabaseConfig {
            system: system.map(String::from),
            path: None,
        };
        api.create_implementation(&config)?;
        Ok(api)
    }

    #[test]
    fn create_without_system_fails() {
        let err = create(None).unwrap_err();
        assert!(matches!(err, DatabaseError::MissingConfiguration(_)));
    }

    #[test]
    fn create_with_empty_system_fails() {
        let err = create(Some("")).unwrap_err();
        assert!(matches!(err, DatabaseError::MissingConfiguration(_)));
    }

    #[test]
    fn create_with_unknown_system_fails() {
        let err = create(Some("NoDatabaseSystemAtAll")).unwrap_err();
        assert!(matches!(err, DatabaseError::UnsupportedBackend(_)));
        assert!(err.to_string().contains("NoDatabaseSystemAtAll"));
    }

    #[test]
    fn create_with_sqlite_binds_sqlite() {
        for system in ["SQLITE", "SQLITE3", "sqlite3"] {
            let api = create(Some(system)).unwrap();
            assert_eq!(api.implementation_name().unwrap(), "SQLite3");
        }
    }

    #[test]
    fn name_before_create_is_invalid_state() {
        let api = DatabaseApi::new();
        let err = api.implementation_name().unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidState(_)));
    }

    #[test]
    fn failed_create_leaves_facade_unbound() {
        let mut api = DatabaseApi::new();
        assert!(api
            .create_implementation(&DatabaseConfig::new("oracle"))
            .is_err());
        assert!(!api.is_bound());
    }

    #[test]
    fn rebinding_drops_previous_connection() {
        let mut api = create(Some("SQLITE3")).unwrap();
        assert!(api.open_connection());
        api.execute_statement("CREATE TABLE t (x INTEGER)").unwrap();

        api.create_implementation(&DatabaseConfig::new("sqlite"))
            .unwrap();
        assert!(!api.is_connected());
        assert!(api.open_connection());
        // fresh in-memory database
        assert!(api.execute_statement("SELECT x FROM t").is_err());
    }

    #[test]
    #[should_panic(expected = "has not been created")]
    fn forwarding_while_unbound_panics() {
        let mut api = DatabaseApi::new();
        api.open_connection();
    }
}
