// # ELTA Courier Adapter
//
// Tracking adapter for ELTA Courier (Greek national postal courier).
//
// ## Wire Format
//
// The tracking endpoint is a browser-facing XHR target, not a documented
// API, so the request has to look like the carrier's own site:
//
// - `POST` with a form-encoded body `number=<TRACKING_NUMBER>&s=0`
// - Browser-like `User-Agent`, `Origin`, and a `Referer` that embeds the
//   tracking number as a query parameter
// - `X-Requested-With: XMLHttpRequest`
//
// The response is UTF-8 JSON text that may carry a leading byte-order mark,
// which must be stripped before decoding. The payload nests two success
// flags: an outer `status == 1` for the lookup itself, then an inner object
// keyed by the tracking number with its own `status == 1` for the parcel.
// Event index 0 is the most recent entry. Native status texts are Greek and
// are looked up in a fixed translation table, falling back to the original
// text when untranslated.

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tracing::{debug, warn};

use tracker_core::config::CourierConfig;
use tracker_core::error::{Error, Result};
use tracker_core::model::{TrackingEvent, TrackingResult, normalize_tracking_number};
use tracker_core::registry::CourierRegistry;
use tracker_core::status::{StatusCategory, categorize};
use tracker_core::traits::{CourierAdapter, CourierFactory};

/// Stable machine key for this carrier
pub const COURIER_KEY: &str = "elta";

/// Display name for this carrier
pub const COURIER_NAME: &str = "ELTA Courier";

/// ELTA tracking endpoint
const API_URL: &str = "https://www.elta-courier.gr/track.php";

/// Site origin, used for the Origin and Referer headers
const BASE_URL: &str = "https://www.elta-courier.gr";

/// Browser-like User-Agent the endpoint expects
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// HTTP timeout for tracking requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Tracking-number grammars claimed by ELTA.
///
/// The first two are the common shipment prefixes; the third covers the
/// general UPU shape with the GR suffix.
static NUMBER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"^SE\d{9}GR$", r"^EL\d{9}GR$", r"^[A-Z]{2}\d{9}GR$"]
        .into_iter()
        .map(|pattern| Regex::new(pattern).expect("tracking pattern compiles"))
        .collect()
});

/// Fixed Greek → English status translation table.
///
/// Lookup is exact; untranslated statuses fall back to the original text.
static STATUS_TRANSLATIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("Αποστολή παραδόθηκε", "Delivered"),
        ("Αποστολή παραδόθηκε σε", "Delivered to"),
        ("Αποστολή βρίσκεται σε στάδιο μεταφοράς", "In Transit"),
        ("Δημιουργία ΣΥ.ΔΕ.ΤΑ.", "Shipment Created"),
    ])
});

/// Keyword table mapping current status text to a category.
///
/// Covers both the translated English wording and the native Greek wording,
/// since untranslated statuses pass through verbatim.
const STATUS_KEYWORDS: &[(&str, StatusCategory)] = &[
    ("delivered", StatusCategory::Delivered),
    ("παραδόθηκε", StatusCategory::Delivered),
    ("transit", StatusCategory::InTransit),
    ("μεταφοράς", StatusCategory::InTransit),
];

/// ELTA Courier adapter
///
/// Stateless and single-shot: one tracking call issues one POST to the
/// tracking endpoint. The adapter holds only an HTTP client (connection
/// pooling is the transport layer's concern) and immutable static tables,
/// so concurrent calls share nothing.
pub struct EltaCourier {
    /// Tracking endpoint (overridable for tests and proxy setups)
    endpoint: String,

    /// HTTP client for tracking requests
    client: reqwest::Client,
}

impl EltaCourier {
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

    /// Issue the tracking request and decode the response body.
    ///
    /// Exactly one outbound call; every failure becomes an [`Error`] for the
    /// `track` boundary to convert.
    async fn fetch(&self, tracking_number: &str) -> Result<Value> {
        let referer = format!("{}/search?br={}", BASE_URL, tracking_number);
        let body = format!("number={}&s=0", tracking_number);

        let response = self
            .client
            .post(&self.endpoint)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json, text/javascript, */*")
            .header("Origin", BASE_URL)
            .header("Referer", referer)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("X-Requested-With", "XMLHttpRequest")
            .body(body)
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

        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("failed to read response body: {}", e)))?;

        decode_body(&text)
    }
}

impl Default for EltaCourier {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode the endpoint's JSON text, stripping the BOM the carrier sometimes
/// prefixes.
fn decode_body(text: &str) -> Result<Value> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    serde_json::from_str(text).map_err(|e| Error::decode(format!("invalid JSON response: {}", e)))
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

/// Render a payload fragment for a diagnostic message
fn detail_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl CourierAdapter for EltaCourier {
    fn courier_key(&self) -> &'static str {
        COURIER_KEY
    }

    fn courier_name(&self) -> &'static str {
        COURIER_NAME
    }

    fn matches(&self, tracking_number: &str) -> bool {
        let normalized = normalize_tracking_number(tracking_number);
        NUMBER_PATTERNS
            .iter()
            .any(|pattern| pattern.is_match(&normalized))
    }

    async fn track(&self, tracking_number: &str) -> TrackingResult {
        let tracking_number = normalize_tracking_number(tracking_number);
        debug!("tracking {} via ELTA", tracking_number);

        match self.fetch(&tracking_number).await {
            Ok(payload) => self.parse(&tracking_number, &payload),
            Err(e) => {
                warn!("ELTA tracking failed for {}: {}", tracking_number, e);
                TrackingResult::failure(COURIER_KEY, COURIER_NAME, &tracking_number, e.to_string())
            }
        }
    }

    fn parse(&self, tracking_number: &str, payload: &Value) -> TrackingResult {
        // Outer flag: did the lookup itself succeed on the carrier's side?
        if payload.get("status").and_then(Value::as_i64) != Some(1) {
            let detail = payload
                .get("result")
                .map(detail_text)
                .unwrap_or_else(|| "unknown error".to_string());
            return TrackingResult::failure(
                COURIER_KEY,
                COURIER_NAME,
                tracking_number,
                format!("carrier reported failure: {}", detail),
            );
        }

        // Inner object is keyed by the tracking number itself and carries its
        // own flag. A missing inner object is treated the same as an explicit
        // not-found.
        let Some(entry) = payload.get("result").and_then(|r| r.get(tracking_number)) else {
            return TrackingResult::not_found(COURIER_KEY, COURIER_NAME, tracking_number);
        };
        if entry.get("status").and_then(Value::as_i64) != Some(1) {
            return TrackingResult::not_found(COURIER_KEY, COURIER_NAME, tracking_number);
        }

        // Index 0 is the most recent entry in the carrier's payload
        let events: Vec<TrackingEvent> = entry
            .get("result")
            .and_then(Value::as_array)
            .map(|raw_events| {
                raw_events
                    .iter()
                    .map(|raw| {
                        let status = str_field(raw, "status");
                        let translated = STATUS_TRANSLATIONS
                            .get(status.as_str())
                            .map(|s| s.to_string());
                        TrackingEvent::new(
                            str_field(raw, "date"),
                            opt_field(raw, "time"),
                            opt_field(raw, "place"),
                            status,
                            translated,
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        let current_status = events
            .first()
            .map(|event| event.status_translated.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let category = categorize(&current_status, STATUS_KEYWORDS);

        TrackingResult::completed(
            COURIER_KEY,
            COURIER_NAME,
            tracking_number,
            current_status,
            category,
            events,
        )
    }
}

/// Factory for creating ELTA adapters
pub struct EltaFactory;

impl CourierFactory for EltaFactory {
    fn create(&self, config: &CourierConfig) -> Result<Arc<dyn CourierAdapter>> {
        match config {
            CourierConfig::Elta { endpoint } => {
                let adapter = match endpoint {
                    Some(url) => EltaCourier::with_endpoint(url.clone()),
                    None => EltaCourier::new(),
                };
                Ok(Arc::new(adapter))
            }
            _ => Err(Error::config("invalid config for ELTA courier")),
        }
    }
}

/// Register the ELTA factory with a registry
///
/// # Example
///
/// ```rust
/// use tracker_core::CourierRegistry;
///
/// let registry = CourierRegistry::new();
/// tracker_courier_elta::register(&registry);
/// ```
pub fn register(registry: &CourierRegistry) {
    registry.register_factory(COURIER_KEY, Box::new(EltaFactory));
}
