//! Users Domain
//!
//! Handles user accounts and saved event favorites with:
//! - MongoDB for persistence (favorites embedded in the user document)
//! - Argon2 for password hashing
//!
//! Favorites mutations rely on the store's atomic update operators
//! (guarded push, pull, field set), so two concurrent changes to the same
//! user are serialized by MongoDB rather than by this crate.

use utoipa::OpenApi;

mod error;
mod handlers;
mod models;
mod mongodb;
mod repository;
mod service;

pub use error::{Result, UserError};
pub use handlers::{auth_router, users_router};
pub use models::{
    AddFavoriteRequest, AuthResponse, Favorite, FavoriteEventPayload, FavoritesResponse,
    LoginRequest, MessageResponse, RegisterRequest, User, UserPublic,
};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::UserService;

/// OpenAPI documentation for the auth endpoints
#[derive(OpenApi)]
#[openapi(
    paths(handlers::register, handlers::login),
    components(schemas(RegisterRequest, LoginRequest, AuthResponse, UserPublic, Favorite)),
    tags(
        (name = "auth", description = "Registration and login")
    )
)]
pub struct AuthApiDoc;

/// OpenAPI documentation for the favorites endpoints
#[derive(OpenApi)]
#[openapi(
    paths(handlers::get_favorites, handlers::add_favorite, handlers::remove_favorite),
    components(schemas(
        AddFavoriteRequest,
        FavoriteEventPayload,
        FavoritesResponse,
        MessageResponse,
        Favorite,
    )),
    tags(
        (name = "users", description = "Per-user favorite events")
    )
)]
pub struct UsersApiDoc;
