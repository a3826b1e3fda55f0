//! User repository trait

use crate::error::Result;
use crate::models::{Favorite, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

/// Repository trait for user storage operations.
///
/// The favorites mutations are atomic per user document; concurrent calls on
/// the same user are serialized by the store, not by this crate.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user
    async fn insert(&self, user: User) -> Result<User>;

    /// Look up a user by (lowercased) email
    async fn find_by_email(&self, email_lower: &str) -> Result<Option<User>>;

    /// Find any user whose lowercased email or username collides with the
    /// given values
    async fn find_conflict(
        &self,
        email_lower: &str,
        username_lower: &str,
    ) -> Result<Option<User>>;

    /// Stamp a successful login time
    async fn record_login(&self, id: &ObjectId, at: DateTime<Utc>) -> Result<()>;

    /// Append a favorite snapshot unless a structurally identical one exists.
    /// Returns whether the document was modified.
    async fn push_favorite(&self, id: &ObjectId, favorite: Favorite) -> Result<bool>;

    /// Remove all favorites matching the event id. Returns whether the
    /// document was modified.
    async fn pull_favorite(&self, id: &ObjectId, event_id: &str) -> Result<bool>;

    /// Fetch the favorites of a user, or `None` if no such user
    async fn get_favorites(&self, id: &ObjectId) -> Result<Option<Vec<Favorite>>>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub UserRepository {}

        #[async_trait]
        impl UserRepository for UserRepository {
            async fn insert(&self, user: User) -> Result<User>;
            async fn find_by_email(&self, email_lower: &str) -> Result<Option<User>>;
            async fn find_conflict(
                &self,
                email_lower: &str,
                username_lower: &str,
            ) -> Result<Option<User>>;
            async fn record_login(&self, id: &ObjectId, at: DateTime<Utc>) -> Result<()>;
            async fn push_favorite(&self, id: &ObjectId, favorite: Favorite) -> Result<bool>;
            async fn pull_favorite(&self, id: &ObjectId, event_id: &str) -> Result<bool>;
            async fn get_favorites(&self, id: &ObjectId) -> Result<Option<Vec<Favorite>>>;
        }
    }
}
