//! JSON REST API handler modules, mounted under `/api/v1`.

#[allow(clippy::missing_errors_doc)]
pub mod amenities;
pub mod body;
#[allow(clippy::missing_errors_doc)]
pub mod cities;
#[allow(clippy::missing_errors_doc)]
pub mod index;
#[allow(clippy::missing_errors_doc)]
pub mod place_amenities;
#[allow(clippy::missing_errors_doc)]
pub mod places;
#[allow(clippy::missing_errors_doc)]
pub mod reviews;
#[allow(clippy::missing_errors_doc)]
pub mod states;
#[allow(clippy::missing_errors_doc)]
pub mod users;
pub mod view;

use std::str::FromStr;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Serialize;

use hbnb_app::ports::Storage;
use hbnb_domain::error::NotFoundError;
use hbnb_domain::record::Kind;

use crate::state::AppState;

/// Build the `/api/v1` sub-router.
pub fn routes<S: Storage + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/status", get(index::status))
        .route("/stats", get(index::stats::<S>))
        // States
        .route("/states", get(states::list::<S>).post(states::create::<S>))
        .route(
            "/states/{id}",
            get(states::get::<S>)
                .put(states::update::<S>)
                .delete(states::delete::<S>),
        )
        // Cities
        .route(
            "/states/{id}/cities",
            get(cities::list::<S>).post(cities::create::<S>),
        )
        .route(
            "/cities/{id}",
            get(cities::get::<S>)
                .put(cities::update::<S>)
                .delete(cities::delete::<S>),
        )
        // Places
        .route(
            "/cities/{id}/places",
            get(places::list::<S>).post(places::create::<S>),
        )
        .route(
            "/places/{id}",
            get(places::get::<S>)
                .put(places::update::<S>)
                .delete(places::delete::<S>),
        )
        .route("/places_search", post(places::search::<S>))
        // Reviews
        .route(
            "/places/{id}/reviews",
            get(reviews::list::<S>).post(reviews::create::<S>),
        )
        .route(
            "/reviews/{id}",
            get(reviews::get::<S>)
                .put(reviews::update::<S>)
                .delete(reviews::delete::<S>),
        )
        // Place ↔ amenity links
        .route("/places/{id}/amenities", get(place_amenities::list::<S>))
        .route(
            "/places/{id}/amenities/{amenity_id}",
            post(place_amenities::link::<S>).delete(place_amenities::unlink::<S>),
        )
        // Amenities
        .route(
            "/amenities",
            get(amenities::list::<S>).post(amenities::create::<S>),
        )
        .route(
            "/amenities/{id}",
            get(amenities::get::<S>)
                .put(amenities::update::<S>)
                .delete(amenities::delete::<S>),
        )
        // Users
        .route("/users", get(users::list::<S>).post(users::create::<S>))
        .route(
            "/users/{id}",
            get(users::get::<S>)
                .put(users::update::<S>)
                .delete(users::delete::<S>),
        )
}

/// Parse an identifier taken from the URL or a body field. Anything that is
/// not a valid id cannot name an existing record, so it is reported as not found.
pub(crate) fn parse_id<I: FromStr>(kind: Kind, raw: &str) -> Result<I, NotFoundError> {
    I::from_str(raw).map_err(|_| NotFoundError::new(kind, raw))
}

/// Possible responses from a list endpoint.
pub enum ListResponse<T> {
    Ok(Json<Vec<T>>),
}

impl<T: Serialize> IntoResponse for ListResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from a get or update endpoint.
pub enum GetResponse<T> {
    Ok(Json<T>),
}

impl<T: Serialize> IntoResponse for GetResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from a create endpoint.
pub enum CreateResponse<T> {
    Created(Json<T>),
}

impl<T: Serialize> IntoResponse for CreateResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from a delete endpoint.
pub enum DeleteResponse {
    Deleted,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted => (StatusCode::OK, Json(serde_json::Map::new())).into_response(),
        }
    }
}
