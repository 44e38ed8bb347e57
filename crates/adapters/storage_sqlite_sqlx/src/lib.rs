//! # hbnb-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the storage façade defined in `hbnb-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows, one table per kind plus
//!   the `place_amenity` link table
//!
//! ## Sessions
//! Writes go through one lazily begun transaction. `save` commits it,
//! `close` rolls it back. Reads issued while it is open see its changes.
//!
//! ## Dependency rule
//! Depends on `hbnb-app` (for the port trait) and `hbnb-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod pool;
pub mod storage;
mod tables;

pub use storage::SqliteStorage;
