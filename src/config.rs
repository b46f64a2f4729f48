//! Backend selection configuration.

use serde::Deserialize;
use std::path::PathBuf;

/// Name of the configuration property selecting the database system.
pub const DATABASE_SYSTEM: &str = "DATABASE_SYSTEM";

/// Environment variable holding the SQLite database file path.
pub const DATABASE_PATH: &str = "DATABASE_PATH";

/// Configuration consumed when the facade creates its implementation.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Identifier of the database system, e.g. `SQLITE3`.
    pub system: Option<String>,
    /// Database file. `None` opens a private in-memory database.
    pub path: Option<PathBuf>,
}

impl DatabaseConfig {
    /// Create a config selecting the given database system
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            path: None,
        }
    }

    /// Set the database file path
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Read `DATABASE_SYSTEM` and `DATABASE_PATH` from the process environment.
    ///
    /// Unset or non-unicode variables are treated as absent; validation of the
    /// system name happens when the implementation is created.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup using the same keys as
    /// [`DatabaseConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            system: lookup(DATABASE_SYSTEM),
            path: lookup(DATABASE_PATH).map(PathBuf::from),
        }
    }

    /// The configured system name, or `None` when unset or empty.
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref().filter(|s| !s.is_empty())
    }
}
