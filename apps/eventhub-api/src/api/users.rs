//! User favorites API routes
//!
//! Wires the users domain's favorites endpoints to MongoDB.

use axum::Router;
use domain_users::{MongoUserRepository, UserService, users_router};
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

/// Create the users router
pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(&state.db);
    let service = Arc::new(UserService::new(repository));

    users_router().with_state(service)
}

/// Initialize user identity indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoUserRepository::new(db);
    repository
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    info!("User collection indexes created");
    Ok(())
}
