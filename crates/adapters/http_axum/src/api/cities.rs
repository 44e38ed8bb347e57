//! City endpoints, including the cities of a state.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use hbnb_app::ports::Storage;
use hbnb_domain::city::{City, CityUpdate};
use hbnb_domain::id::{CityId, StateId};
use hbnb_domain::record::Kind;

use super::body::Payload;
use super::view::Resource;
use super::{CreateResponse, DeleteResponse, GetResponse, ListResponse, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCityRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCityRequest {
    pub name: Option<String>,
}

impl From<UpdateCityRequest> for CityUpdate {
    fn from(req: UpdateCityRequest) -> Self {
        Self { name: req.name }
    }
}

/// `GET /states/{id}/cities`
pub async fn list<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(state_id): Path<String>,
) -> Result<ListResponse<Resource<City>>, ApiError> {
    let state_id: StateId = parse_id(Kind::State, &state_id)?;
    let cities = app.city_service.list_cities_of_state(state_id).await?;
    Ok(ListResponse::Ok(Json(Resource::all(cities))))
}

pub async fn get<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse<Resource<City>>, ApiError> {
    let id: CityId = parse_id(Kind::City, &id)?;
    let city = app.city_service.get_city(id).await?;
    Ok(GetResponse::Ok(Json(Resource::of(city))))
}

/// `POST /states/{id}/cities`
pub async fn create<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(state_id): Path<String>,
    payload: Payload,
) -> Result<CreateResponse<Resource<City>>, ApiError> {
    payload.require("name")?;
    let state_id: StateId = parse_id(Kind::State, &state_id)?;
    let req: CreateCityRequest = payload.deserialize()?;
    let city = City::builder(state_id).name(req.name).build()?;
    let created = app.city_service.create_city(city).await?;
    Ok(CreateResponse::Created(Json(Resource::of(created))))
}

pub async fn update<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<GetResponse<Resource<City>>, ApiError> {
    let id: CityId = parse_id(Kind::City, &id)?;
    let req: UpdateCityRequest = payload.deserialize()?;
    let city = app.city_service.update_city(id, req.into()).await?;
    Ok(GetResponse::Ok(Json(Resource::of(city))))
}

pub async fn delete<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    let id: CityId = parse_id(Kind::City, &id)?;
    app.city_service.delete_city(id).await?;
    Ok(DeleteResponse::Deleted)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::testing::{app, send_json};

    #[tokio::test]
    async fn should_list_only_cities_of_state() {
        let app = app().await;
        let (_, nevada) = send_json(&app, "POST", "/api/v1/states", r#"{"name": "Nevada"}"#).await;
        let (_, oregon) = send_json(&app, "POST", "/api/v1/states", r#"{"name": "Oregon"}"#).await;
        let nevada = format!("/api/v1/states/{}/cities", nevada["id"].as_str().unwrap());
        let oregon = format!("/api/v1/states/{}/cities", oregon["id"].as_str().unwrap());

        let (status, reno) = send_json(&app, "POST", &nevada, r#"{"name": "Reno"}"#).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(reno["__class__"], "City");
        send_json(&app, "POST", &oregon, r#"{"name": "Salem"}"#).await;

        let (status, cities) = send_json(&app, "GET", &nevada, "").await;
        assert_eq!(status, StatusCode::OK);
        let cities = cities.as_array().unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0]["name"], "Reno");
    }

    #[tokio::test]
    async fn should_not_create_city_in_unknown_state() {
        let app = app().await;
        let uri = format!("/api/v1/states/{}/cities", uuid_like());
        let (status, body) = send_json(&app, "POST", &uri, r#"{"name": "Reno"}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn should_check_body_before_state() {
        let app = app().await;
        let uri = format!("/api/v1/states/{}/cities", uuid_like());
        let (status, body) = send_json(&app, "POST", &uri, r#"{"title": "Reno"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing name");
    }

    #[tokio::test]
    async fn should_keep_state_id_on_update() {
        let app = app().await;
        let (_, state) = send_json(&app, "POST", "/api/v1/states", r#"{"name": "Nevada"}"#).await;
        let uri = format!("/api/v1/states/{}/cities", state["id"].as_str().unwrap());
        let (_, city) = send_json(&app, "POST", &uri, r#"{"name": "Reno"}"#).await;

        let body = format!(r#"{{"name": "Las Vegas", "state_id": "{}"}}"#, uuid_like());
        let uri = format!("/api/v1/cities/{}", city["id"].as_str().unwrap());
        let (status, updated) = send_json(&app, "PUT", &uri, &body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Las Vegas");
        assert_eq!(updated["state_id"], state["id"]);
    }

    fn uuid_like() -> String {
        hbnb_domain::id::StateId::new().to_string()
    }
}
