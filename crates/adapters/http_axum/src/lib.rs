//! # hbnb-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON REST API** under `/api/v1` (`/states`, `/cities`,
//!   `/places`, `/reviews`, `/amenities`, `/users`, `/places_search`, …)
//! - Validate request bodies (`Not a JSON`, `Missing <field>`) before any
//!   service call
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into JSON responses tagged with `__class__`
//!
//! ## Dependency rule
//! Depends on `hbnb-app` (for the storage port and services) and `hbnb-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;
