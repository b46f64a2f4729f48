//! Database connection facade with a pluggable SQLite backend.
//!
//! # Intention
//!
//! - Provide a single API for opening connections, executing raw statements
//!   and controlling transactions, independent of the database system.
//! - Select the database system once from configuration and delegate every
//!   call to it.
//!
//! # Architectural Boundaries
//!
//! - Only connection and transaction plumbing belongs here.
//! - No pooling, query building, result mapping or migrations.
//!
//! ```no_run
//! use rust_database_api::{DatabaseApi, DatabaseConfig};
//!
//! let config = DatabaseConfig::new("SQLITE3").with_path("app.db");
//! let mut api = DatabaseApi::from_config(&config)?;
//! assert!(api.open_connection());
//! api.execute_statement("CREATE TABLE IF NOT EXISTS notes (body TEXT)")?;
//! assert!(api.close_connection());
//! # Ok::<(), rust_database_api::DatabaseError>(())
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod registry;
pub mod sqlite;
pub mod value;

pub use api::DatabaseApi;
pub use backend::DatabaseImpl;
pub use config::DatabaseConfig;
pub use error::{DatabaseError, Result};
pub use registry::{BackendRegistry, Constructor};
pub use sqlite::Sqlite3Impl;
pub use value::{ResultSet, Value};
