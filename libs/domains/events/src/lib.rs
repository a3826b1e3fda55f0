//! Events Domain
//!
//! Proxies event search to the Ticketmaster Discovery API and reshapes its
//! responses into a stable internal schema:
//! - filter translation (dates, page size clamping, fixed ascending sort)
//! - per-event normalization with partial-failure isolation
//! - pagination metadata with upstream defaults
//!
//! Nothing here is persisted; every response is rebuilt from the upstream
//! call within the request's lifetime.

use utoipa::OpenApi;

mod client;
mod error;
mod handlers;
mod models;
mod normalize;

pub use client::{TicketmasterClient, TicketmasterConfig};
pub use error::{EventError, Result};
pub use handlers::{EventsState, events_router};
pub use models::{
    EventDetailResponse, EventPage, EventSearchFilter, EventSummary, NormalizedEvent, Pagination,
    PartialEvent, PriceRange, SearchResponse, Venue,
};

/// OpenAPI documentation for the events API
#[derive(OpenApi)]
#[openapi(
    paths(handlers::search_events, handlers::get_event),
    components(schemas(
        SearchResponse,
        EventDetailResponse,
        EventSummary,
        NormalizedEvent,
        PartialEvent,
        Venue,
        PriceRange,
        Pagination,
    )),
    tags(
        (name = "events", description = "Event search over the upstream listing API")
    )
)]
pub struct ApiDoc;
