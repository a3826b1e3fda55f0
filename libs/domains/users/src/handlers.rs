//! HTTP handlers for the auth and favorites API

use crate::error::UserError;
use crate::models::{
    AddFavoriteRequest, AuthResponse, FavoritesResponse, LoginRequest, MessageResponse,
    RegisterRequest,
};
use crate::repository::UserRepository;
use crate::service::UserService;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use axum_helpers::ValidatedJson;
use std::sync::Arc;
use tracing::instrument;

/// Users router state
pub type UsersState<R> = Arc<UserService<R>>;

/// Create the `/auth` router
pub fn auth_router<R: UserRepository + 'static>() -> Router<UsersState<R>> {
    Router::new()
        .route("/register", post(register::<R>))
        .route("/login", post(login::<R>))
}

/// Create the `/users` router (favorites)
pub fn users_router<R: UserRepository + 'static>() -> Router<UsersState<R>> {
    Router::new()
        .route(
            "/{id}/favorites",
            get(get_favorites::<R>).post(add_favorite::<R>),
        )
        .route("/{id}/favorites/{event_id}", delete(remove_favorite::<R>))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Validation failure or duplicate identity"),
    ),
    tag = "auth"
)]
#[instrument(skip(state, input), fields(username = %input.username))]
pub async fn register<R: UserRepository>(
    State(state): State<UsersState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, UserError> {
    let username = input.username.trim().to_string();
    let email = input.email.trim().to_string();

    if username.is_empty() || email.is_empty() || input.password.is_empty() {
        return Err(UserError::Validation(
            "Username, email, and password are required".to_string(),
        ));
    }

    let user = state
        .register(RegisterRequest {
            username,
            email,
            password: input.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            message: "User registered successfully".to_string(),
            user,
        }),
    ))
}

/// Log a user in
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid email or password"),
    ),
    tag = "auth"
)]
#[instrument(skip(state, input))]
pub async fn login<R: UserRepository>(
    State(state): State<UsersState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, UserError> {
    let email = input.email.trim();

    if email.is_empty() || input.password.is_empty() {
        return Err(UserError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let user = state.login(email, &input.password).await?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".to_string(),
        user,
    }))
}

/// List a user's favorites
#[utoipa::path(
    get,
    path = "/{id}/favorites",
    params(
        ("id" = String, Path, description = "User ID (hex ObjectId)")
    ),
    responses(
        (status = 200, description = "Saved favorites", body = FavoritesResponse),
        (status = 404, description = "Malformed id or unknown user"),
    ),
    tag = "users"
)]
#[instrument(skip(state))]
pub async fn get_favorites<R: UserRepository>(
    State(state): State<UsersState<R>>,
    Path(id): Path<String>,
) -> Result<Json<FavoritesResponse>, UserError> {
    let favorites = state.get_favorites(&id).await?;

    Ok(Json(FavoritesResponse {
        success: true,
        favorites,
    }))
}

/// Save an event snapshot into a user's favorites
#[utoipa::path(
    post,
    path = "/{id}/favorites",
    params(
        ("id" = String, Path, description = "User ID (hex ObjectId)")
    ),
    request_body = AddFavoriteRequest,
    responses(
        (status = 200, description = "Added to favorites", body = MessageResponse),
        (status = 400, description = "Duplicate snapshot or unknown user"),
    ),
    tag = "users"
)]
#[instrument(skip(state, input))]
pub async fn add_favorite<R: UserRepository>(
    State(state): State<UsersState<R>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<AddFavoriteRequest>,
) -> Result<Json<MessageResponse>, UserError> {
    state.add_favorite(&id, input.event).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Added to favorites".to_string(),
    }))
}

/// Remove an event from a user's favorites
#[utoipa::path(
    delete,
    path = "/{id}/favorites/{event_id}",
    params(
        ("id" = String, Path, description = "User ID (hex ObjectId)"),
        ("event_id" = String, Path, description = "Upstream event ID")
    ),
    responses(
        (status = 200, description = "Removed from favorites", body = MessageResponse),
        (status = 400, description = "No matching favorite or unknown user"),
    ),
    tag = "users"
)]
#[instrument(skip(state))]
pub async fn remove_favorite<R: UserRepository>(
    State(state): State<UsersState<R>>,
    Path((id, event_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, UserError> {
    state.remove_favorite(&id, &event_id).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Removed from favorites".to_string(),
    }))
}
