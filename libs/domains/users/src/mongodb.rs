//! MongoDB implementation of UserRepository

use crate::error::Result;
use crate::models::{Favorite, User};
use crate::repository::UserRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use mongodb::{Collection, Database};
use tracing::instrument;

/// MongoDB-based user repository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Create a new MongoDB user repository
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("users"),
        }
    }

    /// Create unique indexes backing the case-insensitive identity checks.
    ///
    /// The service layer still performs the application-level conflict check
    /// (it supplies the ordered error messages); the indexes close the race
    /// between check and insert.
    pub async fn create_indexes(&self) -> Result<()> {
        use mongodb::IndexModel;
        use mongodb::options::IndexOptions;

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "username_lower": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn insert(&self, user: User) -> Result<User> {
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    #[instrument(skip(self, email_lower))]
    async fn find_by_email(&self, email_lower: &str) -> Result<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "email": email_lower })
            .await?;
        Ok(user)
    }

    #[instrument(skip(self, email_lower, username_lower))]
    async fn find_conflict(
        &self,
        email_lower: &str,
        username_lower: &str,
    ) -> Result<Option<User>> {
        let filter = doc! {
            "$or": [
                { "email": email_lower },
                { "username_lower": username_lower },
            ]
        };
        let user = self.collection.find_one(filter).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn record_login(&self, id: &ObjectId, at: DateTime<Utc>) -> Result<()> {
        self.collection
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { "last_login": to_bson(&at)? } },
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self, favorite), fields(event_id = ?favorite.event_id))]
    async fn push_favorite(&self, id: &ObjectId, favorite: Favorite) -> Result<bool> {
        // Set-like add: the filter admits the document only when no favorite
        // matches all captured fields, so the push and the duplicate check
        // are a single atomic operation. The added_at stamp is not part of
        // the equality.
        let snapshot_match = doc! {
            "event_id": to_bson(&favorite.event_id)?,
            "name": to_bson(&favorite.name)?,
            "date": to_bson(&favorite.date)?,
            "venue": to_bson(&favorite.venue)?,
            "image": to_bson(&favorite.image)?,
        };
        let filter = doc! {
            "_id": *id,
            "favorites": { "$not": { "$elemMatch": snapshot_match } },
        };
        let update = doc! {
            "$push": { "favorites": to_bson(&favorite)? },
            "$set": { "updated_at": to_bson(&Utc::now())? },
        };

        let result = self.collection.update_one(filter, update).await?;
        Ok(result.modified_count > 0)
    }

    #[instrument(skip(self))]
    async fn pull_favorite(&self, id: &ObjectId, event_id: &str) -> Result<bool> {
        // The filter requires a matching favorite so an untouched document
        // is reported as unmodified rather than masked by the updated_at
        // stamp.
        let filter = doc! {
            "_id": *id,
            "favorites": { "$elemMatch": { "event_id": event_id } },
        };
        let update = doc! {
            "$pull": { "favorites": { "event_id": event_id } },
            "$set": { "updated_at": to_bson(&Utc::now())? },
        };

        let result = self.collection.update_one(filter, update).await?;
        Ok(result.modified_count > 0)
    }

    #[instrument(skip(self))]
    async fn get_favorites(&self, id: &ObjectId) -> Result<Option<Vec<Favorite>>> {
        let user = self.collection.find_one(doc! { "_id": *id }).await?;
        Ok(user.map(|u| u.favorites))
    }
}
