//! Events API routes
//!
//! Wires the events domain to the upstream Discovery API client.

use axum::Router;
use domain_events::{TicketmasterClient, events_router};
use std::sync::Arc;

use crate::state::AppState;

/// Create the events router with an explicitly constructed upstream client
pub fn router(state: &AppState) -> eyre::Result<Router> {
    let client = TicketmasterClient::new(state.config.ticketmaster.clone())?;

    Ok(events_router().with_state(Arc::new(client)))
}
