//! API routes module
//!
//! Defines all HTTP API routes for the Event Hub backend.

pub mod auth;
pub mod events;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> eyre::Result<Router> {
    Ok(Router::new()
        .nest("/events", events::router(state)?)
        .nest("/auth", auth::router(state))
        .nest("/users", users::router(state))
        .merge(health::router(state.clone())))
}
