//! Service status and per-collection counts.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hbnb_app::ports::Storage;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Status {
    status: &'static str,
}

/// Possible responses from the stats endpoint.
pub enum StatsResponse {
    Ok(Json<BTreeMap<&'static str, usize>>),
}

impl IntoResponse for StatsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub async fn status() -> Json<Status> {
    Json(Status { status: "OK" })
}

pub async fn stats<S: Storage + 'static>(
    State(app): State<AppState<S>>,
) -> Result<StatsResponse, ApiError> {
    let counts = app.stats_service.counts().await?;
    Ok(StatsResponse::Ok(Json(counts)))
}
