//! Event domain models
//!
//! The normalized schema is what this service promises its clients; it is
//! rebuilt fresh from every upstream response and never persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

/// Recognized search filters.
///
/// Every filter the API accepts is enumerated here; only these reach the
/// upstream query.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EventSearchFilter {
    /// Free-text keyword
    pub keyword: Option<String>,

    /// City name
    pub city: Option<String>,

    /// Two-letter state code
    pub state_code: Option<String>,

    /// Earliest event date (ISO-8601, trailing `Z` optional)
    pub start_date: Option<String>,

    /// Latest event date (ISO-8601, trailing `Z` optional)
    pub end_date: Option<String>,

    /// Segment category name (e.g. "Music", "Sports")
    pub segment: Option<String>,

    /// Page size; absent or 0 means 20, values above 200 are clamped
    pub size: Option<u32>,

    /// Zero-based page number
    pub page: Option<u32>,
}

/// Venue details extracted from the first embedded venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Venue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub address: String,
}

/// Price range carried over verbatim with per-field defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceRange {
    #[serde(rename = "type")]
    pub kind: String,
    pub min: f64,
    pub max: f64,
    pub currency: String,
}

/// The stable event schema served to clients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: String,
    pub url: Option<String>,

    /// Representative image: the largest declared width wins, first
    /// occurrence on ties
    pub image: Option<String>,

    /// First three upstream image objects, verbatim and in original order
    #[schema(value_type = Vec<Object>)]
    pub images: Vec<Value>,

    /// Upstream dateTime of the start
    pub date: String,
    pub local_date: String,
    pub local_time: String,

    /// Absent when the upstream supplies no venue
    pub venue: Option<Venue>,
    pub price_ranges: Vec<PriceRange>,

    /// Classification taxonomy from the first classification entry only
    pub segment: Option<String>,
    pub genre: Option<String>,
    pub sub_genre: Option<String>,

    /// Sale status code, "onsale" when the upstream omits it
    pub status: String,

    /// Static seatmap URL when available
    pub seatmap: Option<String>,
}

/// Degraded stub for a record that failed normalization
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PartialEvent {
    pub id: String,
    pub name: String,
    pub error: String,
}

/// One event of a search result: fully normalized, or the stub when the
/// upstream record was malformed. A single bad record never blanks the page.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum EventSummary {
    Normalized(Box<NormalizedEvent>),
    Partial(PartialEvent),
}

impl EventSummary {
    /// The event id regardless of degradation
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Normalized(event) => event.id.as_deref(),
            Self::Partial(stub) => Some(&stub.id),
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial(_))
    }
}

/// Pagination metadata mirrored from the upstream `page` object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default = "default_page_size")]
    pub size: u64,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u64,
    #[serde(default)]
    pub number: u64,
}

fn default_page_size() -> u64 {
    20
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            size: 20,
            total_elements: 0,
            total_pages: 0,
            number: 0,
        }
    }
}

/// A normalized page of search results
#[derive(Debug, Clone)]
pub struct EventPage {
    pub events: Vec<EventSummary>,
    pub pagination: Pagination,
}

/// Envelope for `/events/search`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResponse {
    pub success: bool,
    pub events: Vec<EventSummary>,
    pub pagination: Pagination,
}

/// Envelope for `/events/{id}`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventDetailResponse {
    pub success: bool,
    pub event: EventSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.size, 20);
        assert_eq!(pagination.total_elements, 0);
        assert_eq!(pagination.total_pages, 0);
        assert_eq!(pagination.number, 0);
    }

    #[test]
    fn test_pagination_fills_missing_fields() {
        let pagination: Pagination =
            serde_json::from_value(serde_json::json!({ "totalElements": 120 })).unwrap();
        assert_eq!(pagination.size, 20);
        assert_eq!(pagination.total_elements, 120);
    }

    #[test]
    fn test_search_filter_accepts_camel_case_query() {
        let filter: EventSearchFilter = serde_json::from_value(serde_json::json!({
            "keyword": "rock",
            "stateCode": "CA",
            "startDate": "2024-01-01",
            "size": 50
        }))
        .unwrap();

        assert_eq!(filter.keyword.as_deref(), Some("rock"));
        assert_eq!(filter.state_code.as_deref(), Some("CA"));
        assert_eq!(filter.start_date.as_deref(), Some("2024-01-01"));
        assert_eq!(filter.size, Some(50));
        assert!(filter.city.is_none());
    }

    #[test]
    fn test_event_summary_serializes_untagged() {
        let stub = EventSummary::Partial(PartialEvent {
            id: "unknown".to_string(),
            name: "Unknown Event".to_string(),
            error: "Partial data available".to_string(),
        });

        let json = serde_json::to_value(&stub).unwrap();
        assert_eq!(json["error"], "Partial data available");
        assert!(json.get("status").is_none());
    }
}
