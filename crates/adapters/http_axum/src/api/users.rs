//! User endpoints. Password hashes never leave the server.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use hbnb_app::ports::Storage;
use hbnb_domain::id::UserId;
use hbnb_domain::record::Kind;
use hbnb_domain::user::{User, UserUpdate};

use super::body::Payload;
use super::view::{Resource, UserView};
use super::{CreateResponse, DeleteResponse, GetResponse, ListResponse, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// `email` is not listed: it cannot change once the user exists.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

pub async fn list<S: Storage + 'static>(
    State(app): State<AppState<S>>,
) -> Result<ListResponse<Resource<UserView>>, ApiError> {
    let users = app.user_service.list_users().await?;
    Ok(ListResponse::Ok(Json(
        users.into_iter().map(UserView::resource).collect(),
    )))
}

pub async fn get<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse<Resource<UserView>>, ApiError> {
    let id: UserId = parse_id(Kind::User, &id)?;
    let user = app.user_service.get_user(id).await?;
    Ok(GetResponse::Ok(Json(UserView::resource(user))))
}

pub async fn create<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    payload: Payload,
) -> Result<CreateResponse<Resource<UserView>>, ApiError> {
    payload.require("email")?;
    payload.require("password")?;
    let req: CreateUserRequest = payload.deserialize()?;
    let mut builder = User::builder().email(req.email).password(req.password);
    if let Some(first_name) = req.first_name {
        builder = builder.first_name(first_name);
    }
    if let Some(last_name) = req.last_name {
        builder = builder.last_name(last_name);
    }
    let created = app.user_service.create_user(builder.build()?).await?;
    Ok(CreateResponse::Created(Json(UserView::resource(created))))
}

pub async fn update<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<GetResponse<Resource<UserView>>, ApiError> {
    let id: UserId = parse_id(Kind::User, &id)?;
    let req: UpdateUserRequest = payload.deserialize()?;
    let user = app.user_service.update_user(id, req.into()).await?;
    Ok(GetResponse::Ok(Json(UserView::resource(user))))
}

pub async fn delete<S: Storage + 'static>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    let id: UserId = parse_id(Kind::User, &id)?;
    app.user_service.delete_user(id).await?;
    Ok(DeleteResponse::Deleted)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::testing::{app, send_json};

    #[tokio::test]
    async fn should_create_user_without_exposing_password() {
        let app = app().await;
        let body = r#"{"email": "ann@hbnb.io", "password": "secret", "first_name": "Ann"}"#;
        let (status, user) = send_json(&app, "POST", "/api/v1/users", body).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user["__class__"], "User");
        assert_eq!(user["first_name"], "Ann");
        assert_eq!(user["last_name"], "");
        assert!(user.get("password").is_none());

        let (_, users) = send_json(&app, "GET", "/api/v1/users", "").await;
        assert!(users[0].get("password").is_none());
    }

    #[tokio::test]
    async fn should_require_email_then_password() {
        let app = app().await;
        let (status, body) = send_json(&app, "POST", "/api/v1/users", r#"{"password": "x"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing email");

        let (status, body) =
            send_json(&app, "POST", "/api/v1/users", r#"{"email": "ann@hbnb.io"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing password");
    }

    #[tokio::test]
    async fn should_keep_email_on_update() {
        let app = app().await;
        let body = r#"{"email": "ann@hbnb.io", "password": "secret"}"#;
        let (_, user) = send_json(&app, "POST", "/api/v1/users", body).await;
        let uri = format!("/api/v1/users/{}", user["id"].as_str().unwrap());

        let body = r#"{"email": "eve@hbnb.io", "last_name": "Lee"}"#;
        let (status, updated) = send_json(&app, "PUT", &uri, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["email"], "ann@hbnb.io");
        assert_eq!(updated["last_name"], "Lee");
    }

    #[tokio::test]
    async fn should_reject_empty_password_on_update() {
        let app = app().await;
        let body = r#"{"email": "ann@hbnb.io", "password": "secret"}"#;
        let (_, user) = send_json(&app, "POST", "/api/v1/users", body).await;
        let uri = format!("/api/v1/users/{}", user["id"].as_str().unwrap());

        let (status, body) = send_json(&app, "PUT", &uri, r#"{"password": ""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing password");
    }
}
