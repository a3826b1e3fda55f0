//! Auth API routes
//!
//! Wires the users domain's registration and login endpoints to MongoDB.

use axum::Router;
use domain_users::{MongoUserRepository, UserService, auth_router};
use std::sync::Arc;

use crate::state::AppState;

/// Create the auth router
pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(&state.db);
    let service = Arc::new(UserService::new(repository));

    auth_router().with_state(service)
}
