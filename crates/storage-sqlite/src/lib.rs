//! SQLite storage implementation for the Barangay Portal badge engine.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `barangay-portal-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations (the `notification_views` table and the portal tables it reads)
//! - Repository implementations for viewers, watermarks and record snapshots
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//!
//! ```text
//! core (badge engine)        server (HTTP)
//!       │                         │
//!       └────────────┬────────────┘
//!                    │
//!                    ▼
//!         storage-sqlite (this crate)
//!                    │
//!                    ▼
//!                SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod records;
pub mod viewers;
pub mod watermarks;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use records::RecordRepository;
pub use viewers::ViewerRepository;
pub use watermarks::WatermarkRepository;

// Re-export from barangay-portal-core for convenience
pub use barangay_portal_core::errors::{DatabaseError, Error, Result};
