//! User domain models

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A user's saved snapshot of an event's display fields.
///
/// Embedded in the user document. Every captured field is optional because
/// the client sends whatever display data it has; `added_at` is stamped
/// server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Favorite {
    /// Upstream event identifier
    pub event_id: Option<String>,

    /// Event name at the time of saving
    pub name: Option<String>,

    /// Event date at the time of saving
    pub date: Option<String>,

    /// Venue name at the time of saving
    pub venue: Option<String>,

    /// Representative image URL at the time of saving
    pub image: Option<String>,

    /// When the favorite was saved
    pub added_at: DateTime<Utc>,
}

/// User entity - matches the `users` collection schema.
///
/// Never serialized to API responses directly; use [`UserPublic`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    #[serde(rename = "_id")]
    pub id: ObjectId,

    /// Username as entered at registration
    pub username: String,

    /// Lowercased shadow copy for case-insensitive uniqueness checks
    pub username_lower: String,

    /// Email, stored lowercased (unique)
    pub email: String,

    /// Argon2 password hash
    pub password_hash: String,

    /// Saved event snapshots
    #[serde(default)]
    pub favorites: Vec<Favorite>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,

    /// Last successful login, absent until the first login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user (password must already be hashed by the service layer)
    pub fn new(username: String, email_lower: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            username_lower: username.to_lowercase(),
            username,
            email: email_lower,
            password_hash,
            favorites: Vec::new(),
            created_at: now,
            updated_at: now,
            last_login: None,
        }
    }
}

/// Public projection of a user - the hash and shadow fields never leave the
/// service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserPublic {
    /// Identifier as a hex string, under the `_id` key the clients expect
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub favorites: Vec<Favorite>,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            username: user.username,
            email: user.email,
            favorites: user.favorites,
        }
    }
}

/// DTO for user registration
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(max = 100))]
    pub username: String,
    #[validate(length(max = 255))]
    pub email: String,
    #[validate(length(max = 128))]
    pub password: String,
}

/// DTO for user login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(max = 255))]
    pub email: String,
    #[validate(length(max = 128))]
    pub password: String,
}

/// Event display fields the client sends when saving a favorite
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct FavoriteEventPayload {
    /// Upstream event identifier
    pub id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
    pub venue: Option<String>,
    pub image: Option<String>,
}

impl FavoriteEventPayload {
    /// Build the stored snapshot, stamping `added_at`
    pub fn into_favorite(self) -> Favorite {
        Favorite {
            event_id: self.id,
            name: self.name,
            date: self.date,
            venue: self.venue,
            image: self.image,
            added_at: Utc::now(),
        }
    }
}

/// Request body for adding a favorite: `{"event": {...}}`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddFavoriteRequest {
    #[validate(nested)]
    pub event: FavoriteEventPayload,
}

/// Envelope for register/login responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: UserPublic,
}

/// Envelope for the favorites listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FavoritesResponse {
    pub success: bool,
    pub favorites: Vec<Favorite>,
}

/// Envelope for favorite mutations
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}
