//! Axum router assembly.

use axum::Router;
use axum::response::Response;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use hbnb_app::ports::Storage;

use crate::error;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the API under `/api/v1` and answers every other path with a JSON
/// `404`. Includes a [`TraceLayer`] that logs each HTTP request/response at
/// the `DEBUG` level using the `tracing` ecosystem, and a permissive
/// [`CorsLayer`] so browsers on any origin can call the API.
pub fn build<S: Storage + 'static>(state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", crate::api::routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> Response {
    error::not_found()
}
