//! User service layer: registration, login, and favorites business logic.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{info, instrument};

use crate::error::{Result, UserError};
use crate::models::{Favorite, FavoriteEventPayload, RegisterRequest, User, UserPublic};
use crate::repository::UserRepository;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

// Well-formed argon2 hash that verifies nothing. The login path runs a
// verification against it when no user matches, so "unknown email" and
// "wrong password" take the same time.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Service layer for user accounts and favorites
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new user.
    ///
    /// The email is stored lowercased; the username is stored verbatim with
    /// a lowercased shadow copy. Identity conflicts are checked
    /// case-insensitively, email first.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterRequest) -> Result<UserPublic> {
        if input.username.is_empty() || input.email.is_empty() || input.password.is_empty() {
            return Err(UserError::Validation("All fields are required".to_string()));
        }

        if !EMAIL_PATTERN.is_match(&input.email) {
            return Err(UserError::Validation("Invalid email format".to_string()));
        }

        validate_password(&input.password)?;

        let email_lower = input.email.to_lowercase();
        let username_lower = input.username.to_lowercase();

        if let Some(existing) = self
            .repository
            .find_conflict(&email_lower, &username_lower)
            .await?
        {
            // Email takes precedence when both fields collide
            if existing.email == email_lower {
                return Err(UserError::Conflict("Email already registered".to_string()));
            }
            return Err(UserError::Conflict("Username already taken".to_string()));
        }

        let password_hash = self.hash_password(&input.password)?;
        let user = User::new(input.username, email_lower, password_hash);

        let created = self.repository.insert(user).await?;
        info!(user_id = %created.id, "User registered");
        Ok(created.into())
    }

    /// Verify credentials and stamp the login time.
    ///
    /// "No such user" and "wrong password" are indistinguishable to the
    /// caller, in message and in timing.
    #[instrument(skip(self, email, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserPublic> {
        let user = self.repository.find_by_email(&email.to_lowercase()).await?;

        let Some(user) = user else {
            // Burn one verification so this path costs the same as a real one
            let _ = self.verify_password(password, DUMMY_HASH);
            return Err(UserError::InvalidCredentials);
        };

        if !self.verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        self.repository.record_login(&user.id, Utc::now()).await?;
        info!(user_id = %user.id, "User logged in");
        Ok(user.into())
    }

    /// Save an event snapshot into the user's favorites.
    ///
    /// The add is set-like over the captured fields; an unchanged document is
    /// reported as a no-op (duplicate snapshot or unknown user - the store
    /// cannot tell which).
    #[instrument(skip(self, payload), fields(event_id = ?payload.id))]
    pub async fn add_favorite(&self, user_id: &str, payload: FavoriteEventPayload) -> Result<()> {
        let id = parse_user_id(user_id)?;
        let favorite = payload.into_favorite();

        let modified = self.repository.push_favorite(&id, favorite).await?;
        if !modified {
            return Err(UserError::Noop(
                "Already in favorites or user not found".to_string(),
            ));
        }
        Ok(())
    }

    /// Remove all favorites matching the event id.
    #[instrument(skip(self))]
    pub async fn remove_favorite(&self, user_id: &str, event_id: &str) -> Result<()> {
        let id = parse_user_id(user_id)?;

        let modified = self.repository.pull_favorite(&id, event_id).await?;
        if !modified {
            return Err(UserError::Noop(
                "Favorite not found or user not found".to_string(),
            ));
        }
        Ok(())
    }

    /// Fetch the user's saved favorites.
    #[instrument(skip(self))]
    pub async fn get_favorites(&self, user_id: &str) -> Result<Vec<Favorite>> {
        let id = parse_user_id(user_id)?;

        self.repository
            .get_favorites(&id)
            .await?
            .ok_or(UserError::NotFound)
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

fn parse_user_id(user_id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(user_id).map_err(|_| UserError::InvalidId)
}

fn validate_password(password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(UserError::Validation(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(UserError::Validation(
            "Password must contain at least one letter".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(UserError::Validation(
            "Password must contain at least one number".to_string(),
        ));
    }

    Ok(())
}
