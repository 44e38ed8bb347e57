//! Links between places and amenities.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hbnb_app::ports::Storage;
use hbnb_domain::amenity::Amenity;
use hbnb_domain::id::{AmenityId, PlaceId};
use hbnb_domain::record::Kind;

use super::view::Resource;
use super::{DeleteResponse, ListResponse, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from linking an amenity to a place.
pub enum LinkResponse {
    Created(Json<Resource<Amenity>>),
    AlreadyLinked(Json<Resource<Amenity>>),
}

impl IntoResponse for LinkResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
            Self::AlreadyLinked(json) => (StatusCode::OK, json).into_response(),
        }
    }
}

fn parse_ids(place_id: &str, amenity_id: &str) -> Result<(PlaceId, AmenityId), ApiError> {
    Ok((
        parse_id(Kind::Place, place_id)?,
        parse_id(Kind::Amenity, amenity_id)?,
    ))
}

/// `GET /places/{id}/amenities`
pub async fn list<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(place_id): Path<String>,
) -> Result<ListResponse<Resource<Amenity>>, ApiError> {
    let place_id: PlaceId = parse_id(Kind::Place, &place_id)?;
    let amenities = app.place_service.list_amenities(place_id).await?;
    Ok(ListResponse::Ok(Json(Resource::all(amenities))))
}

/// `POST /places/{id}/amenities/{amenity_id}`
pub async fn link<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<LinkResponse, ApiError> {
    let (place_id, amenity_id) = parse_ids(&place_id, &amenity_id)?;
    let (amenity, linked) = app.place_service.link_amenity(place_id, amenity_id).await?;
    let json = Json(Resource::of(amenity));
    Ok(if linked {
        LinkResponse::Created(json)
    } else {
        LinkResponse::AlreadyLinked(json)
    })
}

/// `DELETE /places/{id}/amenities/{amenity_id}`
pub async fn unlink<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<DeleteResponse, ApiError> {
    let (place_id, amenity_id) = parse_ids(&place_id, &amenity_id)?;
    app.place_service.unlink_amenity(place_id, amenity_id).await?;
    Ok(DeleteResponse::Deleted)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::testing::{app, send_json};

    /// A place and an amenity, as `(place_uri, amenity_id)`.
    async fn fixture(app: &axum::Router) -> (String, String) {
        let (_, state) = send_json(app, "POST", "/api/v1/states", r#"{"name": "Idaho"}"#).await;
        let uri = format!("/api/v1/states/{}/cities", state["id"].as_str().unwrap());
        let (_, city) = send_json(app, "POST", &uri, r#"{"name": "Boise"}"#).await;
        let (_, user) = send_json(
            app,
            "POST",
            "/api/v1/users",
            r#"{"email": "host@hbnb.io", "password": "pwd"}"#,
        )
        .await;
        let uri = format!("/api/v1/cities/{}/places", city["id"].as_str().unwrap());
        let body = format!(
            r#"{{"user_id": "{}", "name": "Barn"}}"#,
            user["id"].as_str().unwrap()
        );
        let (_, place) = send_json(app, "POST", &uri, &body).await;
        let (_, wifi) = send_json(app, "POST", "/api/v1/amenities", r#"{"name": "Wifi"}"#).await;
        (
            format!("/api/v1/places/{}", place["id"].as_str().unwrap()),
            wifi["id"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn should_link_once_then_report_existing_link() {
        let app = app().await;
        let (place, wifi) = fixture(&app).await;
        let uri = format!("{place}/amenities/{wifi}");

        let (status, amenity) = send_json(&app, "POST", &uri, "").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(amenity["name"], "Wifi");

        let (status, _) = send_json(&app, "POST", &uri, "").await;
        assert_eq!(status, StatusCode::OK);

        let (_, linked) = send_json(&app, "GET", &format!("{place}/amenities"), "").await;
        assert_eq!(linked.as_array().unwrap().len(), 1);
        let (_, fetched) = send_json(&app, "GET", &place, "").await;
        assert_eq!(fetched["amenity_ids"][0], wifi.as_str());
    }

    #[tokio::test]
    async fn should_answer_not_found_when_unlinking_absent_link() {
        let app = app().await;
        let (place, wifi) = fixture(&app).await;
        let uri = format!("{place}/amenities/{wifi}");

        let (status, _) = send_json(&app, "DELETE", &uri, "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send_json(&app, "POST", &uri, "").await;
        let (status, body) = send_json(&app, "DELETE", &uri, "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({}));
    }

    #[tokio::test]
    async fn should_unlink_deleted_amenity() {
        let app = app().await;
        let (place, wifi) = fixture(&app).await;
        send_json(&app, "POST", &format!("{place}/amenities/{wifi}"), "").await;

        send_json(&app, "DELETE", &format!("/api/v1/amenities/{wifi}"), "").await;

        let (status, linked) = send_json(&app, "GET", &format!("{place}/amenities"), "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(linked.as_array().unwrap().is_empty());
    }
}
