//! Backend registry mapping database system identifiers to constructors.

use std::collections::HashMap;
use tracing::debug;

use crate::backend::DatabaseImpl;
use crate::config::{DatabaseConfig, DATABASE_SYSTEM};
use crate::error::{DatabaseError, Result};
use crate::sqlite::{Sqlite3Impl, SQLITE, SQLITE3};

/// Builds a backend from the configuration. The backend starts disconnected.
pub type Constructor = fn(&DatabaseConfig) -> Box<dyn DatabaseImpl>;

/// Registry of available backends.
///
/// Identifiers are matched case-insensitively. [`BackendRegistry::default`]
/// knows the SQLite backend under `SQLITE3` and `SQLITE`.
#[derive(Clone)]
pub struct BackendRegistry {
    constructors: HashMap<String, Constructor>,
}

impl BackendRegistry {
    /// A registry without any backend.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register a constructor, replacing any previous one for the identifier
    pub fn register(&mut self, system: &str, constructor: Constructor) -> &mut Self {
        self.constructors
            .insert(system.to_ascii_uppercase(), constructor);
        self
    }

    pub fn with(mut self, system: &str, constructor: Constructor) -> Self {
        self.register(system, constructor);
        self
    }

    pub fn contains(&self, system: &str) -> bool {
        self.constructors.contains_key(&system.to_ascii_uppercase())
    }

    /// Identifiers of all registered backends, sorted.
    pub fn systems(&self) -> Vec<&str> {
        let mut systems: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        systems.sort_unstable();
        systems
    }

    /// Create the backend named by `config.system`.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::MissingConfiguration`] when the system is unset or empty,
    /// [`DatabaseError::UnsupportedBackend`] when no backend is registered for it.
    pub fn create(&self, config: &DatabaseConfig) -> Result<Box<dyn DatabaseImpl>> {
        let system = config
            .system()
            .ok_or(DatabaseError::MissingConfiguration(DATABASE_SYSTEM))?;
        let constructor = self
            .constructors
            .get(&system.to_ascii_uppercase())
            .ok_or_else(|| DatabaseError::UnsupportedBackend(system.to_string()))?;
        let backend = constructor(config);
        debug!(system, backend = backend.name(), "created database implementation");
        Ok(backend)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::empty()
            .with(SQLITE3, Sqlite3Impl::create)
            .with(SQLITE, Sqlite3Impl::create)
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("systems", &self.systems())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_knows_sqlite() {
        let registry = BackendRegistry::default();
        assert_eq!(registry.systems(), vec!["SQLITE", "SQLITE3"]);
        assert!(registry.contains("sqlite3"));
        assert!(!registry.contains("postgres"));
    }

    #[test]
    fn create_is_case_insensitive() {
        let registry = BackendRegistry::default();
        for system in ["SQLITE3", "sqlite3", "SqLiTe", "sqlite"] {
            let backend = registry.create(&DatabaseConfig::new(system)).unwrap();
            assert_eq!(backend.name(), "SQLite3");
            assert!(!backend.is_connected());
        }
    }

    #[test]
    fn empty_registry_rejects_everything() {
        let err = BackendRegistry::empty()
            .create(&DatabaseConfig::new("SQLITE3"))
            .err()
            .unwrap();
        assert!(matches!(err, DatabaseError::UnsupportedBackend(s) if s == "SQLITE3"));
    }

    #[test]
    fn missing_system_checked_before_lookup() {
        let err = BackendRegistry::empty()
            .create(&DatabaseConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, DatabaseError::MissingConfiguration(_)));
    }
}
