// # Box Now Adapter
//
// Tracking adapter for Box Now (locker-network courier).
//
// ## Wire Format
//
// - `POST` with a JSON body `{"parcelId": "<TRACKING_NUMBER>"}`
// - Response carries a list of parcels under a `data` key; an empty list is
//   the carrier's not-found signal
// - The first parcel's coarse `state` field is hyphenated lowercase
//   (e.g. "in-transit") and is de-hyphenated and title-cased for display;
//   `state == "delivered"` maps to the delivered category, any other
//   reported state to in-transit
// - Event timestamps are combined date-time strings split on the literal
//   `T` separator into a date part and an up-to-8-character time part;
//   event types are de-hyphenated and title-cased the same way

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tracing::{debug, warn};

use tracker_core::config::CourierConfig;
use tracker_core::error::{Error, Result};
use tracker_core::model::{TrackingEvent, TrackingResult, normalize_tracking_number};
use tracker_core::registry::CourierRegistry;
use tracker_core::status::StatusCategory;
use tracker_core::traits::{CourierAdapter, CourierFactory};

/// Stable machine key for this carrier
pub const COURIER_KEY: &str = "box_now";

/// Display name for this carrier
pub const COURIER_NAME: &str = "Box Now";

/// Box Now parcel tracking endpoint
const API_URL: &str = "https://api-production.boxnow.gr/api/v1/parcels:track";

/// Site origin, sent as the Origin header
const ORIGIN: &str = "https://boxnow.gr";

/// User-Agent the endpoint expects
const USER_AGENT: &str = "Mozilla/5.0";

/// HTTP timeout for tracking requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Tracking-number grammar: BN prefix followed by 8 to 10 digits
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^BN\d{8,10}$").expect("tracking pattern compiles"));

/// Box Now adapter
///
/// Stateless and single-shot: one tracking call issues one POST to the
/// parcel API. Holds only an HTTP client, so concurrent calls share
/// nothing.
pub struct BoxNowCourier {
    /// Tracking endpoint (overridable for tests and proxy setups)
    endpoint: String,

    /// HTTP client for tracking requests
    client: reqwest::Client,
}

impl BoxNowCourier {
    /// Create a new adapter against the production endpoint
    pub fn new() -> Self {
        Self::with_endpoint(API_URL)
    }

    /// Create a new adapter against a custom endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// Issue the tracking request and decode the response body
    async fn fetch(&self, tracking_number: &str) -> Result<Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .header("Origin", ORIGIN)
            .json(&serde_json::json!({ "parcelId": tracking_number }))
            .send()
            .await
            .map_err(|e| Error::transport(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error response".to_string());
            return Err(Error::http_status(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| Error::decode(format!("invalid JSON response: {}", e)))
    }
}

impl Default for BoxNowCourier {
    fn default() -> Self {
        Self::new()
    }
}

/// De-hyphenate and title-case a carrier state or event type,
/// e.g. "out-for-delivery" → "Out For Delivery"
fn humanize(raw: &str) -> String {
    raw.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a combined date-time string on the literal `T` separator.
///
/// The time part is truncated to 8 characters (HH:MM:SS), dropping any
/// zone suffix. Timestamps without a `T` are kept whole as the date.
fn split_timestamp(raw: &str) -> (String, Option<String>) {
    match raw.split_once('T') {
        Some((date, time)) => {
            let time: String = time.chars().take(8).collect();
            (date.to_string(), (!time.is_empty()).then_some(time))
        }
        None => (raw.to_string(), None),
    }
}

/// Extract a string field, treating missing values as empty
fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Extract an optional string field, treating empty strings as absent
fn opt_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl CourierAdapter for BoxNowCourier {
    fn courier_key(&self) -> &'static str {
        COURIER_KEY
    }

    fn courier_name(&self) -> &'static str {
        COURIER_NAME
    }

    fn matches(&self, tracking_number: &str) -> bool {
        NUMBER_PATTERN.is_match(&normalize_tracking_number(tracking_number))
    }

    async fn track(&self, tracking_number: &str) -> TrackingResult {
        let tracking_number = normalize_tracking_number(tracking_number);
        debug!("tracking {} via Box Now", tracking_number);

        match self.fetch(&tracking_number).await {
            Ok(payload) => self.parse(&tracking_number, &payload),
            Err(e) => {
                warn!("Box Now tracking failed for {}: {}", tracking_number, e);
                TrackingResult::failure(COURIER_KEY, COURIER_NAME, &tracking_number, e.to_string())
            }
        }
    }

    fn parse(&self, tracking_number: &str, payload: &Value) -> TrackingResult {
        // An empty parcel list (or none at all) is the not-found signal
        let Some(parcel) = payload
            .get("data")
            .and_then(Value::as_array)
            .and_then(|parcels| parcels.first())
        else {
            return TrackingResult::not_found(COURIER_KEY, COURIER_NAME, tracking_number);
        };

        let events: Vec<TrackingEvent> = parcel
            .get("events")
            .and_then(Value::as_array)
            .map(|raw_events| {
                raw_events
                    .iter()
                    .map(|raw| {
                        let (date, time) = split_timestamp(&str_field(raw, "createTime"));
                        let event_type = str_field(raw, "type");
                        let translated = humanize(&event_type);
                        TrackingEvent::new(
                            date,
                            time,
                            opt_field(raw, "locationDisplayName"),
                            event_type,
                            (!translated.is_empty()).then_some(translated),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        let state = str_field(parcel, "state");
        let (status, category) = if state.is_empty() {
            ("Unknown".to_string(), StatusCategory::Unknown)
        } else if state == "delivered" {
            (humanize(&state), StatusCategory::Delivered)
        } else {
            (humanize(&state), StatusCategory::InTransit)
        };

        TrackingResult::completed(
            COURIER_KEY,
            COURIER_NAME,
            tracking_number,
            status,
            category,
            events,
        )
    }
}

/// Factory for creating Box Now adapters
pub struct BoxNowFactory;

impl CourierFactory for BoxNowFactory {
    fn create(&self, config: &CourierConfig) -> Result<Arc<dyn CourierAdapter>> {
        match config {
            CourierConfig::BoxNow { endpoint } => {
                let adapter = match endpoint {
                    Some(url) => BoxNowCourier::with_endpoint(url.clone()),
                    None => BoxNowCourier::new(),
                };
                Ok(Arc::new(adapter))
            }
            _ => Err(Error::config("invalid config for Box Now courier")),
        }
    }
}

/// Register the Box Now factory with a registry
pub fn register(registry: &CourierRegistry) {
    registry.register_factory(COURIER_KEY, Box::new(BoxNowFactory));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_matches_grammar() {
        let adapter = BoxNowCourier::new();

        assert!(adapter.matches("BN12345678"));
        assert!(adapter.matches("BN123456789"));
        assert!(adapter.matches("BN1234567890"));
        assert!(adapter.matches(" bn12345678 "));

        assert!(!adapter.matches("BN1234567")); // seven digits
        assert!(!adapter.matches("BN12345678901")); // eleven digits
        assert!(!adapter.matches("SE101046219GR"));
        assert!(!adapter.matches("1234567890"));
        assert!(!adapter.matches(""));
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("out-for-delivery"), "Out For Delivery");
        assert_eq!(humanize("delivered"), "Delivered");
        assert_eq!(humanize("in-transit"), "In Transit");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_split_timestamp() {
        assert_eq!(
            split_timestamp("2024-01-02T10:00:00Z"),
            ("2024-01-02".to_string(), Some("10:00:00".to_string()))
        );
        assert_eq!(split_timestamp("2024-01-02"), ("2024-01-02".to_string(), None));
        assert_eq!(split_timestamp(""), (String::new(), None));
    }

    #[test]
    fn test_parse_empty_data_is_not_found() {
        let adapter = BoxNowCourier::new();

        let result = adapter.parse("BN99999999", &json!({"data": []}));
        assert!(result.success);
        assert_eq!(result.status, "Not Found");
        assert_eq!(result.status_category, StatusCategory::Unknown);
        assert!(result.events.is_empty());

        // A payload without the data key reads the same way
        let result = adapter.parse("BN99999999", &json!({}));
        assert_eq!(result.status, "Not Found");
    }

    #[test]
    fn test_parse_delivered_parcel() {
        let adapter = BoxNowCourier::new();
        let payload = json!({
            "data": [{
                "state": "delivered",
                "events": [{
                    "createTime": "2024-01-02T10:00:00Z",
                    "type": "out-for-delivery",
                    "locationDisplayName": "Athens"
                }]
            }]
        });

        let result = adapter.parse("BN12345678", &payload);
        assert!(result.success);
        assert_eq!(result.status, "Delivered");
        assert_eq!(result.status_category, StatusCategory::Delivered);
        assert_eq!(result.events.len(), 1);

        let event = &result.events[0];
        assert_eq!(event.date, "2024-01-02");
        assert_eq!(event.time.as_deref(), Some("10:00:00"));
        assert_eq!(event.location.as_deref(), Some("Athens"));
        assert_eq!(event.status, "out-for-delivery");
        assert_eq!(event.status_translated, "Out For Delivery");
        assert_eq!(result.latest_event.as_ref(), Some(event));
    }

    #[test]
    fn test_parse_in_transit_parcel() {
        let adapter = BoxNowCourier::new();
        let payload = json!({
            "data": [{
                "state": "in-transit",
                "events": []
            }]
        });

        let result = adapter.parse("BN12345678", &payload);
        assert_eq!(result.status, "In Transit");
        assert_eq!(result.status_category, StatusCategory::InTransit);
        assert!(result.latest_event.is_none());
    }

    #[test]
    fn test_parse_missing_state_is_unknown() {
        let adapter = BoxNowCourier::new();
        let payload = json!({"data": [{"events": []}]});

        let result = adapter.parse("BN12345678", &payload);
        assert!(result.success);
        assert_eq!(result.status, "Unknown");
        assert_eq!(result.status_category, StatusCategory::Unknown);
    }

    #[test]
    fn test_parse_uses_first_parcel() {
        let adapter = BoxNowCourier::new();
        let payload = json!({
            "data": [
                {"state": "delivered", "events": []},
                {"state": "in-transit", "events": []}
            ]
        });

        let result = adapter.parse("BN12345678", &payload);
        assert_eq!(result.status_category, StatusCategory::Delivered);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let adapter = BoxNowCourier::new();
        let payload = json!({"data": [{"state": "in-transit", "events": []}]});

        assert_eq!(
            adapter.parse("BN12345678", &payload),
            adapter.parse("BN12345678", &payload)
        );
    }

    #[test]
    fn test_factory_creation() {
        let factory = BoxNowFactory;

        let adapter = factory.create(&CourierConfig::BoxNow { endpoint: None });
        assert!(adapter.is_ok());
        assert_eq!(adapter.unwrap().courier_key(), "box_now");
    }

    #[test]
    fn test_factory_rejects_foreign_config() {
        let factory = BoxNowFactory;

        let result = factory.create(&CourierConfig::Elta { endpoint: None });
        assert!(result.is_err());
    }
}
