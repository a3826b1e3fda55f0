//! Upstream response normalization
//!
//! Reshapes Discovery API event JSON into the stable internal schema.
//! Normalization is per event: a structurally malformed record degrades to a
//! minimal stub instead of failing the whole page.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::{
    EventPage, EventSummary, NormalizedEvent, Pagination, PartialEvent, PriceRange, Venue,
};

/// How many upstream image objects are carried over verbatim
const IMAGES_KEPT: usize = 3;

// Upstream wire shapes. Everything is optional; a type mismatch anywhere in
// a record is what triggers the per-event stub.

#[derive(Debug, Deserialize)]
struct UpstreamEvent {
    id: Option<String>,
    name: Option<String>,
    info: Option<String>,
    #[serde(rename = "pleaseNote")]
    please_note: Option<String>,
    url: Option<String>,
    #[serde(default)]
    images: Vec<Map<String, Value>>,
    dates: Option<UpstreamDates>,
    #[serde(default)]
    classifications: Vec<UpstreamClassification>,
    #[serde(rename = "priceRanges", default)]
    price_ranges: Vec<UpstreamPriceRange>,
    #[serde(rename = "_embedded")]
    embedded: Option<UpstreamEmbedded>,
    seatmap: Option<UpstreamSeatmap>,
}

#[derive(Debug, Deserialize)]
struct UpstreamDates {
    start: Option<UpstreamStart>,
    status: Option<UpstreamStatus>,
}

#[derive(Debug, Deserialize)]
struct UpstreamStart {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    #[serde(rename = "localDate")]
    local_date: Option<String>,
    #[serde(rename = "localTime")]
    local_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpstreamStatus {
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpstreamClassification {
    segment: Option<NamedRef>,
    genre: Option<NamedRef>,
    #[serde(rename = "subGenre")]
    sub_genre: Option<NamedRef>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpstreamPriceRange {
    #[serde(rename = "type")]
    kind: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpstreamEmbedded {
    #[serde(default)]
    venues: Vec<UpstreamVenue>,
}

#[derive(Debug, Deserialize)]
struct UpstreamVenue {
    name: Option<String>,
    city: Option<NamedRef>,
    state: Option<NamedRef>,
    country: Option<NamedRef>,
    address: Option<UpstreamAddress>,
}

#[derive(Debug, Deserialize)]
struct UpstreamAddress {
    line1: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpstreamSeatmap {
    #[serde(rename = "staticUrl")]
    static_url: Option<String>,
}

/// Normalize a whole search response body.
///
/// A missing `_embedded.events` array yields an empty page, and a missing
/// `page` object yields default pagination - neither is an error.
pub(crate) fn normalize_page(data: &Value) -> EventPage {
    let events = data
        .get("_embedded")
        .and_then(|embedded| embedded.get("events"))
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(normalize_event).collect())
        .unwrap_or_default();

    let pagination = data
        .get("page")
        .and_then(|page| serde_json::from_value::<Pagination>(page.clone()).ok())
        .unwrap_or_default();

    EventPage { events, pagination }
}

/// Normalize one event record, degrading to the stub on any structural error.
pub(crate) fn normalize_event(value: &Value) -> EventSummary {
    match try_normalize(value) {
        Ok(event) => EventSummary::Normalized(Box::new(event)),
        Err(err) => {
            tracing::warn!(error = %err, "Event normalization failed, returning stub");
            EventSummary::Partial(PartialEvent {
                id: value
                    .get("id")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                name: value
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown Event")
                    .to_string(),
                error: "Partial data available".to_string(),
            })
        }
    }
}

fn try_normalize(value: &Value) -> Result<NormalizedEvent, serde_json::Error> {
    let event: UpstreamEvent = serde_json::from_value(value.clone())?;

    let venue = event
        .embedded
        .and_then(|embedded| embedded.venues.into_iter().next())
        .map(|venue| Venue {
            name: venue.name.unwrap_or_else(|| "Unknown Venue".to_string()),
            city: venue.city.and_then(|c| c.name).unwrap_or_default(),
            state: venue.state.and_then(|s| s.name).unwrap_or_default(),
            country: venue.country.and_then(|c| c.name).unwrap_or_default(),
            address: venue.address.and_then(|a| a.line1).unwrap_or_default(),
        });

    let price_ranges = event
        .price_ranges
        .into_iter()
        .map(|price| PriceRange {
            kind: price.kind.unwrap_or_else(|| "standard".to_string()),
            min: price.min.unwrap_or(0.0),
            max: price.max.unwrap_or(0.0),
            currency: price.currency.unwrap_or_else(|| "USD".to_string()),
        })
        .collect();

    let image = representative_image(&event.images);
    let images = event
        .images
        .iter()
        .take(IMAGES_KEPT)
        .cloned()
        .map(Value::Object)
        .collect();

    let (date, local_date, local_time, status) = match event.dates {
        Some(dates) => {
            let (date, local_date, local_time) = match dates.start {
                Some(start) => (
                    start.date_time.unwrap_or_default(),
                    start.local_date.unwrap_or_default(),
                    start.local_time.unwrap_or_default(),
                ),
                None => Default::default(),
            };
            let status = dates.status.and_then(|s| s.code);
            (date, local_date, local_time, status)
        }
        None => Default::default(),
    };

    let mut classifications = event.classifications.into_iter();
    let (segment, genre, sub_genre) = match classifications.next() {
        Some(first) => (
            first.segment.and_then(|s| s.name),
            first.genre.and_then(|g| g.name),
            first.sub_genre.and_then(|s| s.name),
        ),
        None => (None, None, None),
    };

    Ok(NormalizedEvent {
        id: event.id,
        name: event.name,
        description: event.info.or(event.please_note).unwrap_or_default(),
        url: event.url,
        image,
        images,
        date,
        local_date,
        local_time,
        venue,
        price_ranges,
        segment,
        genre,
        sub_genre,
        status: status.unwrap_or_else(|| "onsale".to_string()),
        seatmap: event.seatmap.and_then(|s| s.static_url),
    })
}

/// Pick the image with the largest declared width.
///
/// A missing or non-numeric width counts as 0. Ties keep the first
/// occurrence, so the selection is stable across reorderings of equal-width
/// tails.
fn representative_image(images: &[Map<String, Value>]) -> Option<String> {
    let mut best: Option<(&Map<String, Value>, u64)> = None;

    for image in images {
        let width = image.get("width").and_then(Value::as_u64).unwrap_or(0);
        match best {
            Some((_, best_width)) if width <= best_width => {}
            _ => best = Some((image, width)),
        }
    }

    best.and_then(|(image, _)| image.get("url"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event_with_images(images: Value) -> Value {
        json!({
            "id": "evt1",
            "name": "Concert",
            "images": images,
        })
    }

    fn full_event() -> Value {
        json!({
            "id": "G5vYZ9",
            "name": "Rock Night",
            "info": "An evening of rock",
            "url": "https://tickets.example/G5vYZ9",
            "images": [
                {"url": "https://img.example/small.jpg", "width": 100, "height": 56},
                {"url": "https://img.example/large.jpg", "width": 500, "height": 281},
                {"url": "https://img.example/medium.jpg", "width": 300, "height": 169},
                {"url": "https://img.example/extra.jpg", "width": 200, "height": 113}
            ],
            "dates": {
                "start": {
                    "dateTime": "2024-06-15T19:00:00Z",
                    "localDate": "2024-06-15",
                    "localTime": "19:00:00"
                },
                "status": {"code": "offsale"}
            },
            "classifications": [
                {
                    "segment": {"name": "Music"},
                    "genre": {"name": "Rock"},
                    "subGenre": {"name": "Alternative Rock"}
                },
                {
                    "segment": {"name": "Ignored"},
                    "genre": {"name": "Ignored"}
                }
            ],
            "priceRanges": [
                {"type": "standard", "min": 25.0, "max": 99.5, "currency": "USD"},
                {"min": 10.0}
            ],
            "_embedded": {
                "venues": [
                    {
                        "name": "Main Hall",
                        "city": {"name": "Los Angeles"},
                        "state": {"name": "California"},
                        "country": {"name": "United States Of America"},
                        "address": {"line1": "111 Main St"}
                    },
                    {"name": "Second Venue"}
                ]
            },
            "seatmap": {"staticUrl": "https://maps.example/G5vYZ9.png"}
        })
    }

    fn unwrap_normalized(summary: EventSummary) -> NormalizedEvent {
        match summary {
            EventSummary::Normalized(event) => *event,
            EventSummary::Partial(stub) => panic!("expected full event, got stub: {:?}", stub),
        }
    }

    #[test]
    fn test_full_event_normalization() {
        let event = unwrap_normalized(normalize_event(&full_event()));

        assert_eq!(event.id.as_deref(), Some("G5vYZ9"));
        assert_eq!(event.description, "An evening of rock");
        assert_eq!(event.date, "2024-06-15T19:00:00Z");
        assert_eq!(event.local_date, "2024-06-15");
        assert_eq!(event.local_time, "19:00:00");
        assert_eq!(event.status, "offsale");
        assert_eq!(
            event.seatmap.as_deref(),
            Some("https://maps.example/G5vYZ9.png")
        );

        // First embedded venue only
        let venue = event.venue.unwrap();
        assert_eq!(venue.name, "Main Hall");
        assert_eq!(venue.city, "Los Angeles");
        assert_eq!(venue.address, "111 Main St");

        // First classification entry only
        assert_eq!(event.segment.as_deref(), Some("Music"));
        assert_eq!(event.genre.as_deref(), Some("Rock"));
        assert_eq!(event.sub_genre.as_deref(), Some("Alternative Rock"));
    }

    #[test]
    fn test_widest_image_wins_and_three_are_kept() {
        let event = unwrap_normalized(normalize_event(&full_event()));

        assert_eq!(event.image.as_deref(), Some("https://img.example/large.jpg"));
        assert_eq!(event.images.len(), 3);
        // Original order, not width order
        assert_eq!(event.images[0]["url"], "https://img.example/small.jpg");
        assert_eq!(event.images[1]["url"], "https://img.example/large.jpg");
        assert_eq!(event.images[2]["url"], "https://img.example/medium.jpg");
    }

    #[test]
    fn test_widest_image_tie_keeps_first_occurrence() {
        let value = event_with_images(json!([
            {"url": "https://img.example/a.jpg", "width": 500},
            {"url": "https://img.example/b.jpg", "width": 500},
            {"url": "https://img.example/c.jpg", "width": 100}
        ]));

        let event = unwrap_normalized(normalize_event(&value));
        assert_eq!(event.image.as_deref(), Some("https://img.example/a.jpg"));
    }

    #[test]
    fn test_missing_width_counts_as_zero() {
        let value = event_with_images(json!([
            {"url": "https://img.example/nowidth.jpg"},
            {"url": "https://img.example/sized.jpg", "width": 10}
        ]));

        let event = unwrap_normalized(normalize_event(&value));
        assert_eq!(event.image.as_deref(), Some("https://img.example/sized.jpg"));
    }

    #[test]
    fn test_no_images_means_no_representative() {
        let event = unwrap_normalized(normalize_event(&event_with_images(json!([]))));
        assert!(event.image.is_none());
        assert!(event.images.is_empty());
    }

    #[test]
    fn test_price_range_defaults() {
        let event = unwrap_normalized(normalize_event(&full_event()));

        assert_eq!(event.price_ranges.len(), 2);
        assert_eq!(event.price_ranges[0].kind, "standard");
        assert_eq!(event.price_ranges[0].max, 99.5);

        // Second range had only "min"
        assert_eq!(event.price_ranges[1].kind, "standard");
        assert_eq!(event.price_ranges[1].min, 10.0);
        assert_eq!(event.price_ranges[1].max, 0.0);
        assert_eq!(event.price_ranges[1].currency, "USD");
    }

    #[test]
    fn test_absent_venue_is_not_an_error() {
        let event = unwrap_normalized(normalize_event(&json!({
            "id": "evt1",
            "name": "No Venue Show"
        })));

        assert!(event.venue.is_none());
        assert_eq!(event.status, "onsale");
        assert_eq!(event.description, "");
        assert!(event.price_ranges.is_empty());
    }

    #[test]
    fn test_description_falls_back_to_please_note() {
        let event = unwrap_normalized(normalize_event(&json!({
            "id": "evt1",
            "name": "Show",
            "pleaseNote": "Doors at 7"
        })));

        assert_eq!(event.description, "Doors at 7");
    }

    #[test]
    fn test_malformed_event_degrades_to_stub() {
        let value = json!({
            "id": "evt-broken",
            "name": "Broken Show",
            "images": "not-an-array"
        });

        match normalize_event(&value) {
            EventSummary::Partial(stub) => {
                assert_eq!(stub.id, "evt-broken");
                assert_eq!(stub.name, "Broken Show");
                assert_eq!(stub.error, "Partial data available");
            }
            EventSummary::Normalized(_) => panic!("malformed event should degrade"),
        }
    }

    #[test]
    fn test_stub_defaults_when_id_and_name_unusable() {
        let value = json!({"images": 42});

        match normalize_event(&value) {
            EventSummary::Partial(stub) => {
                assert_eq!(stub.id, "unknown");
                assert_eq!(stub.name, "Unknown Event");
            }
            EventSummary::Normalized(_) => panic!("malformed event should degrade"),
        }
    }

    #[test]
    fn test_one_bad_record_does_not_blank_the_page() {
        let mut events: Vec<Value> = (0..9)
            .map(|i| {
                json!({
                    "id": format!("evt{}", i),
                    "name": format!("Show {}", i)
                })
            })
            .collect();
        events.insert(4, json!({"id": "bad", "name": "Bad", "dates": "tomorrow"}));

        let page = normalize_page(&json!({
            "_embedded": {"events": events},
            "page": {"size": 10, "totalElements": 10, "totalPages": 1, "number": 0}
        }));

        assert_eq!(page.events.len(), 10);
        let partial: Vec<_> = page.events.iter().filter(|e| e.is_partial()).collect();
        assert_eq!(partial.len(), 1);
        assert_eq!(partial[0].id(), Some("bad"));
    }

    #[test]
    fn test_empty_body_yields_empty_page_with_default_pagination() {
        let page = normalize_page(&json!({}));

        assert!(page.events.is_empty());
        assert_eq!(page.pagination, Pagination::default());
    }

    #[test]
    fn test_pagination_carried_from_upstream() {
        let page = normalize_page(&json!({
            "page": {"size": 50, "totalElements": 1234, "totalPages": 25, "number": 3}
        }));

        assert_eq!(page.pagination.size, 50);
        assert_eq!(page.pagination.total_elements, 1234);
        assert_eq!(page.pagination.total_pages, 25);
        assert_eq!(page.pagination.number, 3);
    }
}
