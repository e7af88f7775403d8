//! Uniform result model shared by all courier adapters
//!
//! Both types here are immutable value objects: constructed once per request
//! through the [`TrackingResult`] constructors and returned to the caller.
//! The constructors enforce the model invariants:
//!
//! - `success == false` implies `status_category == Error` and empty `events`
//! - `latest_event` is present iff `events` is non-empty, and always equals
//!   `events[0]`
//!
//! Event order within one result is the order the carrier returned; there is
//! no cross-carrier ordering guarantee.

use crate::status::StatusCategory;
use serde::{Deserialize, Serialize};

/// Normalize a raw tracking number for matching and display.
///
/// Every entry point (detection, adapter dispatch, adapters themselves)
/// normalizes the same way, so callers may pass numbers with stray
/// whitespace or lowercase letters.
pub fn normalize_tracking_number(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// One milestone in a parcel's journey, as reported by its carrier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEvent {
    /// Calendar date in carrier-local format; empty if unknown
    pub date: String,

    /// Time of day, when the carrier reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Free-text place name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Raw carrier status text
    pub status: String,

    /// Normalized/human-readable status text; equals `status` when no
    /// translation exists
    pub status_translated: String,
}

impl TrackingEvent {
    /// Create an event, defaulting the translated status to the raw status
    pub fn new(
        date: impl Into<String>,
        time: Option<String>,
        location: Option<String>,
        status: impl Into<String>,
        status_translated: Option<String>,
    ) -> Self {
        let status = status.into();
        let status_translated = status_translated.unwrap_or_else(|| status.clone());
        Self {
            date: date.into(),
            time,
            location,
            status,
            status_translated,
        }
    }
}

/// The uniform outcome of one tracking attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResult {
    /// True iff the remote call completed and returned an interpretable
    /// payload, even if the parcel itself was not found
    pub success: bool,

    /// The normalized (trimmed, upper-cased) input
    pub tracking_number: String,

    /// Stable machine key of the carrier that handled the request
    pub courier: String,

    /// Display name of the carrier
    pub courier_name: String,

    /// Current normalized status string ("Unknown" / "Not Found" when
    /// indeterminate)
    pub status: String,

    /// Carrier-independent classification of `status`
    pub status_category: StatusCategory,

    /// Recorded milestones, most-recent-first per carrier convention
    pub events: Vec<TrackingEvent>,

    /// Copy of `events[0]`, present iff `events` is non-empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_event: Option<TrackingEvent>,

    /// Human-readable diagnostic, present iff `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TrackingResult {
    /// A completed lookup with an interpretable payload.
    ///
    /// `latest_event` is derived from the first event, which carriers report
    /// as the most recent one.
    pub fn completed(
        courier: &str,
        courier_name: &str,
        tracking_number: &str,
        status: impl Into<String>,
        status_category: StatusCategory,
        events: Vec<TrackingEvent>,
    ) -> Self {
        let latest_event = events.first().cloned();
        Self {
            success: true,
            tracking_number: tracking_number.to_string(),
            courier: courier.to_string(),
            courier_name: courier_name.to_string(),
            status: status.into(),
            status_category,
            events,
            latest_event,
            error_message: None,
        }
    }

    /// The carrier affirmatively reported no such parcel.
    ///
    /// Found-but-empty is not an error: the call succeeded and the result
    /// carries status "Not Found" with no events.
    pub fn not_found(courier: &str, courier_name: &str, tracking_number: &str) -> Self {
        Self::completed(
            courier,
            courier_name,
            tracking_number,
            "Not Found",
            StatusCategory::Unknown,
            Vec::new(),
        )
    }

    /// The tracking attempt itself failed.
    ///
    /// Every failure path (transport, HTTP status, decode, unknown courier,
    /// timeout) funnels through here so callers always see one shape.
    pub fn failure(
        courier: &str,
        courier_name: &str,
        tracking_number: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            tracking_number: tracking_number.to_string(),
            courier: courier.to_string(),
            courier_name: courier_name.to_string(),
            status: "Error".to_string(),
            status_category: StatusCategory::Error,
            events: Vec::new(),
            latest_event: None,
            error_message: Some(message.into()),
        }
    }
}
