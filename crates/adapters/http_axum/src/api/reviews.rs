//! Review endpoints, including the reviews of a place.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use hbnb_app::ports::Storage;
use hbnb_domain::id::{PlaceId, ReviewId, UserId};
use hbnb_domain::record::Kind;
use hbnb_domain::review::{Review, ReviewUpdate};

use super::body::Payload;
use super::view::Resource;
use super::{CreateResponse, DeleteResponse, GetResponse, ListResponse, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub text: Option<String>,
}

impl From<UpdateReviewRequest> for ReviewUpdate {
    fn from(req: UpdateReviewRequest) -> Self {
        Self { text: req.text }
    }
}

/// `GET /places/{id}/reviews`
pub async fn list<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(place_id): Path<String>,
) -> Result<ListResponse<Resource<Review>>, ApiError> {
    let place_id: PlaceId = parse_id(Kind::Place, &place_id)?;
    let reviews = app.review_service.list_reviews_of_place(place_id).await?;
    Ok(ListResponse::Ok(Json(Resource::all(reviews))))
}

pub async fn get<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse<Resource<Review>>, ApiError> {
    let id: ReviewId = parse_id(Kind::Review, &id)?;
    let review = app.review_service.get_review(id).await?;
    Ok(GetResponse::Ok(Json(Resource::of(review))))
}

/// `POST /places/{id}/reviews`
pub async fn create<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(place_id): Path<String>,
    payload: Payload,
) -> Result<CreateResponse<Resource<Review>>, ApiError> {
    payload.require("user_id")?;
    payload.require("text")?;
    let place_id: PlaceId = parse_id(Kind::Place, &place_id)?;
    let user_id: UserId = payload.require_id("user_id", Kind::User)?;
    let req: CreateReviewRequest = payload.deserialize()?;
    let review = Review::new(place_id, user_id, req.text)?;
    let created = app.review_service.create_review(review).await?;
    Ok(CreateResponse::Created(Json(Resource::of(created))))
}

pub async fn update<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<GetResponse<Resource<Review>>, ApiError> {
    let id: ReviewId = parse_id(Kind::Review, &id)?;
    let req: UpdateReviewRequest = payload.deserialize()?;
    let review = app.review_service.update_review(id, req.into()).await?;
    Ok(GetResponse::Ok(Json(Resource::of(review))))
}

pub async fn delete<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    let id: ReviewId = parse_id(Kind::Review, &id)?;
    app.review_service.delete_review(id).await?;
    Ok(DeleteResponse::Deleted)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::testing::{app, send_json};

    /// A place and its owner, as `(place_id, user_id)`.
    async fn fixture(app: &axum::Router) -> (String, String) {
        let (_, state) = send_json(app, "POST", "/api/v1/states", r#"{"name": "Utah"}"#).await;
        let uri = format!("/api/v1/states/{}/cities", state["id"].as_str().unwrap());
        let (_, city) = send_json(app, "POST", &uri, r#"{"name": "Provo"}"#).await;
        let (_, user) = send_json(
            app,
            "POST",
            "/api/v1/users",
            r#"{"email": "guest@hbnb.io", "password": "pwd"}"#,
        )
        .await;
        let user_id = user["id"].as_str().unwrap().to_string();
        let uri = format!("/api/v1/cities/{}/places", city["id"].as_str().unwrap());
        let body = format!(r#"{{"user_id": "{user_id}", "name": "Cabin"}}"#);
        let (_, place) = send_json(app, "POST", &uri, &body).await;
        (place["id"].as_str().unwrap().to_string(), user_id)
    }

    #[tokio::test]
    async fn should_create_and_list_reviews_of_place() {
        let app = app().await;
        let (place_id, user_id) = fixture(&app).await;
        let uri = format!("/api/v1/places/{place_id}/reviews");
        let body = format!(r#"{{"user_id": "{user_id}", "text": "Cosy"}}"#);

        let (status, review) = send_json(&app, "POST", &uri, &body).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(review["__class__"], "Review");
        assert_eq!(review["place_id"], place_id.as_str());

        let (status, reviews) = send_json(&app, "GET", &uri, "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reviews.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_require_text() {
        let app = app().await;
        let (place_id, user_id) = fixture(&app).await;
        let uri = format!("/api/v1/places/{place_id}/reviews");
        let body = format!(r#"{{"user_id": "{user_id}"}}"#);

        let (status, body) = send_json(&app, "POST", &uri, &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing text");
    }

    #[tokio::test]
    async fn should_keep_author_on_update() {
        let app = app().await;
        let (place_id, user_id) = fixture(&app).await;
        let uri = format!("/api/v1/places/{place_id}/reviews");
        let body = format!(r#"{{"user_id": "{user_id}", "text": "Cosy"}}"#);
        let (_, review) = send_json(&app, "POST", &uri, &body).await;

        let uri = format!("/api/v1/reviews/{}", review["id"].as_str().unwrap());
        let body = format!(r#"{{"text": "Noisy", "user_id": "{place_id}"}}"#);
        let (status, updated) = send_json(&app, "PUT", &uri, &body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["text"], "Noisy");
        assert_eq!(updated["user_id"], user_id.as_str());
    }

    #[tokio::test]
    async fn should_drop_reviews_with_their_place() {
        let app = app().await;
        let (place_id, user_id) = fixture(&app).await;
        let uri = format!("/api/v1/places/{place_id}/reviews");
        let body = format!(r#"{{"user_id": "{user_id}", "text": "Cosy"}}"#);
        let (_, review) = send_json(&app, "POST", &uri, &body).await;

        send_json(&app, "DELETE", &format!("/api/v1/places/{place_id}"), "").await;

        let uri = format!("/api/v1/reviews/{}", review["id"].as_str().unwrap());
        let (status, _) = send_json(&app, "GET", &uri, "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
