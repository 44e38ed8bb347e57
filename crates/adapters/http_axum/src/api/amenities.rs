//! Amenity endpoints.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use hbnb_app::ports::Storage;
use hbnb_domain::amenity::{Amenity, AmenityUpdate};
use hbnb_domain::id::AmenityId;
use hbnb_domain::record::Kind;

use super::body::Payload;
use super::view::Resource;
use super::{CreateResponse, DeleteResponse, GetResponse, ListResponse, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAmenityRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAmenityRequest {
    pub name: Option<String>,
}

impl From<UpdateAmenityRequest> for AmenityUpdate {
    fn from(req: UpdateAmenityRequest) -> Self {
        Self { name: req.name }
    }
}

pub async fn list<S: Storage + 'static>(
    State(app): State<AppState<S>>,
) -> Result<ListResponse<Resource<Amenity>>, ApiError> {
    let amenities = app.amenity_service.list_amenities().await?;
    Ok(ListResponse::Ok(Json(Resource::all(amenities))))
}

pub async fn get<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse<Resource<Amenity>>, ApiError> {
    let id: AmenityId = parse_id(Kind::Amenity, &id)?;
    let amenity = app.amenity_service.get_amenity(id).await?;
    Ok(GetResponse::Ok(Json(Resource::of(amenity))))
}

pub async fn create<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    payload: Payload,
) -> Result<CreateResponse<Resource<Amenity>>, ApiError> {
    payload.require("name")?;
    let req: CreateAmenityRequest = payload.deserialize()?;
    let created = app
        .amenity_service
        .create_amenity(Amenity::new(req.name)?)
        .await?;
    Ok(CreateResponse::Created(Json(Resource::of(created))))
}

pub async fn update<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<GetResponse<Resource<Amenity>>, ApiError> {
    let id: AmenityId = parse_id(Kind::Amenity, &id)?;
    let req: UpdateAmenityRequest = payload.deserialize()?;
    let amenity = app.amenity_service.update_amenity(id, req.into()).await?;
    Ok(GetResponse::Ok(Json(Resource::of(amenity))))
}

pub async fn delete<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    let id: AmenityId = parse_id(Kind::Amenity, &id)?;
    app.amenity_service.delete_amenity(id).await?;
    Ok(DeleteResponse::Deleted)
}
