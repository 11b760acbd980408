//! SQLite storage implementation for the school health tracker.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `school-health-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for students and health records
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The `core` crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! All writes are funnelled through a single writer task ([`WriteHandle`]),
//! each job running in its own `IMMEDIATE` transaction. Reads use pooled
//! connections directly.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod health_records;
pub mod students;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export repositories
pub use health_records::HealthRecordRepository;
pub use students::StudentRepository;

// Re-export from school-health-core for convenience
pub use school_health_core::errors::{DatabaseError, Error, Result};
