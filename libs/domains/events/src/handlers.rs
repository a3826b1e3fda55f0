//! HTTP handlers for the events API

use crate::client::TicketmasterClient;
use crate::models::{EventDetailResponse, EventSearchFilter, SearchResponse};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::AppError;
use std::sync::Arc;
use tracing::instrument;

/// Events router state
pub type EventsState = Arc<TicketmasterClient>;

/// Create the events router
pub fn events_router() -> Router<EventsState> {
    Router::new()
        .route("/search", get(search_events))
        .route("/{id}", get(get_event))
}

/// Search events through the upstream API
#[utoipa::path(
    get,
    path = "/search",
    params(EventSearchFilter),
    responses(
        (status = 200, description = "Normalized events with pagination", body = SearchResponse),
        (status = 400, description = "Bad filter or upstream failure"),
    ),
    tag = "events"
)]
#[instrument(skip(state, filter))]
pub async fn search_events(
    State(state): State<EventsState>,
    Query(filter): Query<EventSearchFilter>,
) -> Result<Json<SearchResponse>, crate::error::EventError> {
    let page = state.search(&filter).await?;

    Ok(Json(SearchResponse {
        success: true,
        events: page.events,
        pagination: page.pagination,
    }))
}

/// Fetch a single event by its upstream id
#[utoipa::path(
    get,
    path = "/{id}",
    params(
        ("id" = String, Path, description = "Upstream event ID")
    ),
    responses(
        (status = 200, description = "Normalized event", body = EventDetailResponse),
        (status = 404, description = "Unknown event or upstream failure"),
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<EventsState>,
    Path(id): Path<String>,
) -> Result<Json<EventDetailResponse>, AppError> {
    // Any failure on the single-event path renders as 404
    match state.get_event(&id).await {
        Ok(event) => Ok(Json(EventDetailResponse {
            success: true,
            event,
        })),
        Err(err) => Err(AppError::NotFound(format!("Failed to get event: {}", err))),
    }
}
