//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL-backed post store via SeaORM
//!
//! The in-memory store is always available and is what the integration
//! suite runs against.

pub mod database;
pub mod memory;

pub use memory::MemoryPostStore;

#[cfg(feature = "postgres")]
pub use database::PostgresPostStore;

pub use database::DatabaseConfig;
