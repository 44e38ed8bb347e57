//! # hbnb-adapter-storage-json
//!
//! File persistence adapter: every record lives in one in-memory map that is
//! written to a single JSON document on `save`.
//!
//! ## Responsibilities
//! - Implement the storage façade defined in `hbnb-app::ports::storage`
//! - Load the document at startup (a missing file means an empty store)
//! - Replace the document atomically (temp file + rename) on `save`
//! - Reload from disk on `close`, dropping unsaved changes
//!
//! ## Document shape
//! A JSON object keyed by `"<Kind>.<id>"`, each value a record carrying its
//! attributes plus `__class__`.
//!
//! ## Dependency rule
//! Depends on `hbnb-app` (for the port trait) and `hbnb-domain` (for domain types).

pub mod error;
pub mod storage;

pub use storage::FileStorage;
