//! # hbnb-domain
//!
//! Pure domain model for the hbnb listing service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **States** and the **Cities** that belong to them
//! - Define **Users** (hosts and reviewers)
//! - Define **Places** (listings in a city, owned by a user, linked to amenities)
//! - Define **Amenities** and **Reviews**
//! - Define the **record model** (`Kind`, `RecordKey`, `Record`) the storage
//!   façade speaks in
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod record;
pub mod time;

pub mod amenity;
pub mod city;
pub mod place;
pub mod review;
pub mod state;
pub mod user;
