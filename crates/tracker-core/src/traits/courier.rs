// # Courier Adapter Trait
//
// Defines the interface for carrier tracking integrations.
//
// ## Implementations
//
// - ELTA Courier: `tracker-courier-elta` crate
// - Box Now: `tracker-courier-boxnow` crate
// - Future: ACS, Speedex, Courier Center, etc.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::CourierConfig;
use crate::error::Result;
use crate::model::TrackingResult;

/// Trait for courier adapter implementations
///
/// An adapter knows one carrier's tracking-number grammar, builds that
/// carrier's request, and parses that carrier's response into the uniform
/// [`TrackingResult`].
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks. Each
/// `track` invocation is independent and stateless: adapters hold only an
/// HTTP client and immutable static tables, so unbounded concurrent calls
/// are safe.
///
/// # Constraints
///
/// - `track` issues exactly one outbound request per invocation. Retries, if
///   desired, are a caller-level concern layered outside this core.
/// - `track` must never raise past its boundary: every failure path (non-2xx
///   response, malformed payload, transport failure, timeout) is converted
///   into a failure `TrackingResult`.
/// - `matches` and `parse` are pure: no I/O, no side effects.
#[async_trait]
pub trait CourierAdapter: Send + Sync {
    /// Stable machine key of this carrier (e.g. "elta", "box_now")
    fn courier_key(&self) -> &'static str;

    /// Display name of this carrier (e.g. "ELTA Courier")
    fn courier_name(&self) -> &'static str;

    /// Test a candidate against this carrier's tracking-number grammar.
    ///
    /// The candidate is normalized (trimmed, upper-cased) before matching,
    /// so any string input yields a boolean, including the empty string.
    fn matches(&self, tracking_number: &str) -> bool;

    /// Track a parcel via the carrier's web API.
    ///
    /// Normalizes the input, issues one outbound request with
    /// carrier-specific headers and body encoding, and returns a uniform
    /// result. Never returns an error and never panics; failures become
    /// `success == false` results.
    async fn track(&self, tracking_number: &str) -> TrackingResult;

    /// Interpret a decoded response payload for the given tracking number.
    ///
    /// Pure and deterministic, separated from [`track`](Self::track) for
    /// testability: identical payloads yield identical results. Each
    /// implementation defines its own "not found" signal, which maps to a
    /// successful result with status "Not Found" and no events.
    fn parse(&self, tracking_number: &str, payload: &serde_json::Value) -> TrackingResult;
}

/// Helper trait for constructing courier adapters from configuration
pub trait CourierFactory: Send + Sync {
    /// Create a courier adapter instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this courier
    ///
    /// # Returns
    ///
    /// A shared adapter trait object, or a configuration error if the
    /// config variant does not belong to this factory.
    fn create(&self, config: &CourierConfig) -> Result<Arc<dyn CourierAdapter>>;
}
