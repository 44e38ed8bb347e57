//! State endpoints.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use hbnb_app::ports::Storage;
use hbnb_domain::id::StateId;
use hbnb_domain::record::Kind;
use hbnb_domain::state::{self as domain, StateUpdate};

use super::body::Payload;
use super::view::Resource;
use super::{CreateResponse, DeleteResponse, GetResponse, ListResponse, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateStateRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStateRequest {
    pub name: Option<String>,
}

impl From<UpdateStateRequest> for StateUpdate {
    fn from(req: UpdateStateRequest) -> Self {
        Self { name: req.name }
    }
}

pub async fn list<S: Storage + 'static>(
    State(app): State<AppState<S>>,
) -> Result<ListResponse<Resource<domain::State>>, ApiError> {
    let states = app.state_service.list_states().await?;
    Ok(ListResponse::Ok(Json(Resource::all(states))))
}

pub async fn get<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse<Resource<domain::State>>, ApiError> {
    let id: StateId = parse_id(Kind::State, &id)?;
    let state = app.state_service.get_state(id).await?;
    Ok(GetResponse::Ok(Json(Resource::of(state))))
}

pub async fn create<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    payload: Payload,
) -> Result<CreateResponse<Resource<domain::State>>, ApiError> {
    payload.require("name")?;
    let req: CreateStateRequest = payload.deserialize()?;
    let state = domain::State::builder().name(req.name).build()?;
    let created = app.state_service.create_state(state).await?;
    Ok(CreateResponse::Created(Json(Resource::of(created))))
}

pub async fn update<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<GetResponse<Resource<domain::State>>, ApiError> {
    let id: StateId = parse_id(Kind::State, &id)?;
    let req: UpdateStateRequest = payload.deserialize()?;
    let state = app.state_service.update_state(id, req.into()).await?;
    Ok(GetResponse::Ok(Json(Resource::of(state))))
}

pub async fn delete<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    let id: StateId = parse_id(Kind::State, &id)?;
    app.state_service.delete_state(id).await?;
    Ok(DeleteResponse::Deleted)
}
