/// Database module for PostgreSQL integration
///
/// This module provides:
/// - r2d2 connection pooling
/// - Repository pattern implementation for the companies table
/// - Database models and schema
/// - Embedded Diesel migrations
pub mod connection;
pub mod models;
pub mod repositories;
pub mod schema;

pub use connection::{establish_connection_pool, run_migrations, DatabasePool};
