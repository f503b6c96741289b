//! SQLite storage implementation for Stockfolio.
//!
//! This crate provides the document store behind the holding repositories,
//! using Diesel with SQLite. It contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The `DocumentStoreTrait` implementation
//! - The single writer actor every write goes through
//!
//! This crate is the only place in the application where Diesel
//! dependencies exist; `stockfolio-core` works with traits only.

pub mod db;
pub mod documents;
pub mod errors;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

pub use documents::SqliteDocumentStore;

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from stockfolio-core for convenience
pub use stockfolio_core::errors::{DatabaseError, Error, Result};
