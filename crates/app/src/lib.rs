//! # hbnb-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **storage façade** (`Storage`) that persistence adapters
//!   implement: `all`, `get`, `count`, `stage`, `save`, `delete`, `close`
//! - Define **driving/inbound ports** as use-case structs, one per resource:
//!   - `StateService`, `CityService`, `UserService`
//!   - `PlaceService` (including amenity links and search)
//!   - `AmenityService`, `ReviewService`, `StatsService`
//! - Enforce foreign-key existence on creation and cascade deletes the same
//!   way whatever the backend
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `hbnb-domain` only (plus `argon2` for password hashing).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
