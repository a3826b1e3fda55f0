//! Ticketmaster Discovery API client
//!
//! Translates search filters into upstream query parameters, performs the
//! HTTP call with a fixed timeout, and hands the body to the normalizer.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::{EventError, Result};
use crate::models::{EventPage, EventSearchFilter, EventSummary};
use crate::normalize::{normalize_event, normalize_page};

/// Discovery API base URL
const DISCOVERY_API: &str = "https://app.ticketmaster.com/discovery/v2";

/// Fixed upstream request timeout
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Page size used when the caller supplies none (or zero)
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upstream maximum page size
const MAX_PAGE_SIZE: u32 = 200;

/// Wire format for date filters
const WIRE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Upstream API configuration
#[derive(Debug, Clone)]
pub struct TicketmasterConfig {
    /// API key sent with every request
    pub api_key: String,

    /// Base URL, overridable for testing against a stub server
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TicketmasterConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DISCOVERY_API.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Stateless client for the upstream event-listing API.
///
/// Explicitly constructed and handed to the route layer; it holds no mutable
/// state beyond the pooled HTTP connections inside `reqwest::Client`.
pub struct TicketmasterClient {
    config: TicketmasterConfig,
    client: Client,
}

impl TicketmasterClient {
    /// Build a client with the fixed request timeout applied.
    pub fn new(config: TicketmasterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Search events and normalize the response page.
    #[instrument(skip(self, filter), fields(keyword = ?filter.keyword, city = ?filter.city))]
    pub async fn search(&self, filter: &EventSearchFilter) -> Result<EventPage> {
        let params = self.build_query(filter)?;
        let url = format!("{}/events.json", self.config.base_url);

        debug!(param_count = params.len(), "Querying upstream event search");
        let data = self.fetch_json(&url, &params).await?;

        Ok(normalize_page(&data))
    }

    /// Fetch and normalize a single event by its upstream id.
    #[instrument(skip(self))]
    pub async fn get_event(&self, event_id: &str) -> Result<EventSummary> {
        let url = format!("{}/events/{}.json", self.config.base_url, event_id);
        let params = vec![("apikey", self.config.api_key.clone())];

        let data = self.fetch_json(&url, &params).await?;

        Ok(normalize_event(&data))
    }

    async fn fetch_json(&self, url: &str, params: &[(&'static str, String)]) -> Result<Value> {
        let response = self.client.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EventError::Upstream {
                status: Some(status.as_u16()),
                message: format!("Ticketmaster returned status {}", status),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| EventError::Parse(e.to_string()))
    }

    /// Translate the filter struct into upstream query parameters.
    ///
    /// Results are always requested sorted ascending by date.
    fn build_query(&self, filter: &EventSearchFilter) -> Result<Vec<(&'static str, String)>> {
        let mut params = vec![("apikey", self.config.api_key.clone())];

        if let Some(keyword) = &filter.keyword {
            params.push(("keyword", keyword.clone()));
        }

        if let Some(city) = &filter.city {
            params.push(("city", city.clone()));
        }

        if let Some(state_code) = &filter.state_code {
            params.push(("stateCode", state_code.clone()));
        }

        if let Some(start_date) = &filter.start_date {
            params.push(("startDateTime", format_event_date(start_date)?));
        }

        if let Some(end_date) = &filter.end_date {
            params.push(("endDateTime", format_event_date(end_date)?));
        }

        if let Some(segment) = &filter.segment {
            params.push(("segmentName", segment.clone()));
        }

        params.push(("size", clamp_page_size(filter.size).to_string()));

        if let Some(page) = filter.page {
            params.push(("page", page.to_string()));
        }

        params.push(("sort", "date,asc".to_string()));

        Ok(params)
    }
}

/// Parse an ISO-8601 date filter (trailing `Z` optional, time optional) and
/// re-emit it in the fixed upstream wire format.
fn format_event_date(raw: &str) -> Result<String> {
    // Offset-carrying timestamps keep their local clock time, the offset is
    // dropped in favor of the literal Z marker
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local().format(WIRE_DATE_FORMAT).to_string());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.format(WIRE_DATE_FORMAT).to_string());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date
            .and_time(NaiveTime::MIN)
            .format(WIRE_DATE_FORMAT)
            .to_string());
    }

    Err(EventError::Validation(format!(
        "Invalid date filter: {}",
        raw
    )))
}

/// Clamp the requested page size into [1, 200]; absent or zero means 20.
fn clamp_page_size(size: Option<u32>) -> u32 {
    match size {
        None | Some(0) => DEFAULT_PAGE_SIZE,
        Some(size) => size.min(MAX_PAGE_SIZE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> TicketmasterClient {
        TicketmasterClient::new(TicketmasterConfig::new("test-key")).unwrap()
    }

    fn query_value<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_bare_date_gains_midnight_and_z() {
        assert_eq!(
            format_event_date("2024-01-01").unwrap(),
            "2024-01-01T00:00:00Z"
        );
    }

    #[test]
    fn test_date_with_z_is_accepted() {
        assert_eq!(
            format_event_date("2024-06-15T10:30:00Z").unwrap(),
            "2024-06-15T10:30:00Z"
        );
    }

    #[test]
    fn test_date_without_z_is_accepted() {
        assert_eq!(
            format_event_date("2024-06-15T10:30:00").unwrap(),
            "2024-06-15T10:30:00Z"
        );
    }

    #[test]
    fn test_offset_keeps_local_clock_time() {
        assert_eq!(
            format_event_date("2024-06-15T10:30:00+02:00").unwrap(),
            "2024-06-15T10:30:00Z"
        );
    }

    #[test]
    fn test_malformed_date_is_a_validation_error() {
        let err = format_event_date("not-a-date").unwrap_err();
        assert!(matches!(err, EventError::Validation(_)));
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn test_page_size_clamping() {
        assert_eq!(clamp_page_size(None), 20);
        assert_eq!(clamp_page_size(Some(0)), 20);
        assert_eq!(clamp_page_size(Some(1)), 1);
        assert_eq!(clamp_page_size(Some(7)), 7);
        assert_eq!(clamp_page_size(Some(200)), 200);
        assert_eq!(clamp_page_size(Some(500)), 200);
    }

    #[test]
    fn test_query_always_sorts_by_date_ascending() {
        let client = test_client();
        let params = client.build_query(&EventSearchFilter::default()).unwrap();

        assert_eq!(query_value(&params, "sort"), Some("date,asc"));
        assert_eq!(query_value(&params, "apikey"), Some("test-key"));
        assert_eq!(query_value(&params, "size"), Some("20"));
        assert!(query_value(&params, "keyword").is_none());
        assert!(query_value(&params, "page").is_none());
    }

    #[test]
    fn test_query_translates_every_filter() {
        let client = test_client();
        let filter = EventSearchFilter {
            keyword: Some("rock".to_string()),
            city: Some("Los Angeles".to_string()),
            state_code: Some("CA".to_string()),
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-12-31T23:59:59Z".to_string()),
            segment: Some("Music".to_string()),
            size: Some(500),
            page: Some(2),
        };

        let params = client.build_query(&filter).unwrap();

        assert_eq!(query_value(&params, "keyword"), Some("rock"));
        assert_eq!(query_value(&params, "city"), Some("Los Angeles"));
        assert_eq!(query_value(&params, "stateCode"), Some("CA"));
        assert_eq!(
            query_value(&params, "startDateTime"),
            Some("2024-01-01T00:00:00Z")
        );
        assert_eq!(
            query_value(&params, "endDateTime"),
            Some("2024-12-31T23:59:59Z")
        );
        assert_eq!(query_value(&params, "segmentName"), Some("Music"));
        assert_eq!(query_value(&params, "size"), Some("200"));
        assert_eq!(query_value(&params, "page"), Some("2"));
    }

    #[test]
    fn test_query_rejects_malformed_dates() {
        let client = test_client();
        let filter = EventSearchFilter {
            start_date: Some("tomorrow".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            client.build_query(&filter),
            Err(EventError::Validation(_))
        ));
    }

    #[test]
    fn test_config_defaults() {
        let config = TicketmasterConfig::new("key");
        assert_eq!(config.base_url, "https://app.ticketmaster.com/discovery/v2");
        assert_eq!(config.timeout_secs, 10);
    }
}
