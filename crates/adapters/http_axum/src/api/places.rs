//! Place endpoints, including the places of a city and place search.

use std::str::FromStr;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::Value;

use hbnb_app::ports::Storage;
use hbnb_app::services::place_service::PlaceSearch;
use hbnb_domain::id::{CityId, PlaceId, UserId};
use hbnb_domain::place::{Place, PlaceUpdate};
use hbnb_domain::record::Kind;

use super::body::Payload;
use super::view::{PlaceSummary, Resource};
use super::{CreateResponse, DeleteResponse, GetResponse, ListResponse, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Writable place attributes. Used for both creation and update.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlaceAttributes {
    pub name: Option<String>,
    pub description: Option<String>,
    pub number_rooms: Option<u32>,
    pub number_bathrooms: Option<u32>,
    pub max_guest: Option<u32>,
    pub price_by_night: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<PlaceAttributes> for PlaceUpdate {
    fn from(req: PlaceAttributes) -> Self {
        Self {
            name: req.name,
            description: req.description,
            number_rooms: req.number_rooms,
            number_bathrooms: req.number_bathrooms,
            max_guest: req.max_guest,
            price_by_night: req.price_by_night,
            latitude: req.latitude,
            longitude: req.longitude,
        }
    }
}

/// Body of `POST /places_search`. Entries of any JSON type are accepted;
/// those that are not id strings name no record.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub states: Vec<Value>,
    pub cities: Vec<Value>,
    pub amenities: Vec<Value>,
}

impl SearchRequest {
    /// An unparsable state or city id still selects by location: it
    /// matches no place instead of lifting the filter.
    fn selects_nothing(&self, filter: &PlaceSearch) -> bool {
        (!self.states.is_empty() || !self.cities.is_empty())
            && self.amenities.is_empty()
            && filter.states.is_empty()
            && filter.cities.is_empty()
    }
}

fn parse_all<I: FromStr>(raw: &[Value]) -> Vec<I> {
    raw.iter()
        .filter_map(|id| id.as_str()?.parse().ok())
        .collect()
}

/// `GET /cities/{id}/places`
pub async fn list<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(city_id): Path<String>,
) -> Result<ListResponse<Resource<Place>>, ApiError> {
    let city_id: CityId = parse_id(Kind::City, &city_id)?;
    let places = app.place_service.list_places_of_city(city_id).await?;
    Ok(ListResponse::Ok(Json(Resource::all(places))))
}

pub async fn get<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse<Resource<Place>>, ApiError> {
    let id: PlaceId = parse_id(Kind::Place, &id)?;
    let place = app.place_service.get_place(id).await?;
    Ok(GetResponse::Ok(Json(Resource::of(place))))
}

/// `POST /cities/{id}/places`
pub async fn create<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(city_id): Path<String>,
    payload: Payload,
) -> Result<CreateResponse<Resource<Place>>, ApiError> {
    payload.require("user_id")?;
    payload.require("name")?;
    let city_id: CityId = parse_id(Kind::City, &city_id)?;
    let user_id: UserId = payload.require_id("user_id", Kind::User)?;
    let attributes: PlaceAttributes = payload.deserialize()?;
    let place = Place::builder(city_id, user_id)
        .attributes(attributes.into())
        .build()?;
    let created = app.place_service.create_place(place).await?;
    Ok(CreateResponse::Created(Json(Resource::of(created))))
}

pub async fn update<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<GetResponse<Resource<Place>>, ApiError> {
    let id: PlaceId = parse_id(Kind::Place, &id)?;
    let attributes: PlaceAttributes = payload.deserialize()?;
    let place = app.place_service.update_place(id, attributes.into()).await?;
    Ok(GetResponse::Ok(Json(Resource::of(place))))
}

pub async fn delete<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    let id: PlaceId = parse_id(Kind::Place, &id)?;
    app.place_service.delete_place(id).await?;
    Ok(DeleteResponse::Deleted)
}

/// `POST /places_search`. Unlike other bodies, `{}` is accepted and
/// returns every place.
pub async fn search<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    body: Bytes,
) -> Result<ListResponse<Resource<PlaceSummary>>, ApiError> {
    let req: SearchRequest = Payload::from_slice(&body)?.deserialize()?;
    let filter = PlaceSearch {
        states: parse_all(&req.states),
        cities: parse_all(&req.cities),
        amenities: parse_all(&req.amenities),
    };
    if req.selects_nothing(&filter) {
        return Ok(ListResponse::Ok(Json(Vec::new())));
    }
    let places = app.place_service.search(&filter).await?;
    Ok(ListResponse::Ok(Json(
        places.into_iter().map(PlaceSummary::resource).collect(),
    )))
}
