//! Database layer - connection pool, process-wide cache, repositories
//!
//! # Design Principles
//!
//! - One pool per process, memoized in a single-assignment cell
//! - Owner expansion via JOIN - no per-row follow-up queries
//! - Dynamic filters always use bound parameters, never string splicing

pub mod cache;
pub mod pool;
pub mod repos;

pub use cache::{connection, ConnectionCache};
pub use pool::create_pool;

/// Embedded schema migrations for the gallery store.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
