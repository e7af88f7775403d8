//! Test doubles and common utilities for engine contract tests
//!
//! This module provides minimal courier stubs that verify orchestration
//! behavior without any real carrier integration.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracker_core::model::{TrackingEvent, TrackingResult, normalize_tracking_number};
use tracker_core::status::StatusCategory;
use tracker_core::traits::CourierAdapter;

/// A stub courier with a prefix-based grammar and a canned result
///
/// `track` counts invocations and optionally sleeps before answering, which
/// lets tests drive the engine's timeout path deterministically under
/// paused tokio time.
pub struct StubCourier {
    key: &'static str,
    name: &'static str,
    prefix: &'static str,
    delay: Option<Duration>,
    track_calls: Arc<AtomicUsize>,
}

impl StubCourier {
    pub fn new(key: &'static str, name: &'static str, prefix: &'static str) -> Self {
        Self {
            key,
            name,
            prefix,
            delay: None,
            track_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make `track` sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Handle onto the invocation counter, valid after the stub moves into
    /// the registry
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.track_calls.clone()
    }
}

#[async_trait]
impl CourierAdapter for StubCourier {
    fn courier_key(&self) -> &'static str {
        self.key
    }

    fn courier_name(&self) -> &'static str {
        self.name
    }

    fn matches(&self, tracking_number: &str) -> bool {
        normalize_tracking_number(tracking_number).starts_with(self.prefix)
    }

    async fn track(&self, tracking_number: &str) -> TrackingResult {
        self.track_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let events = vec![TrackingEvent::new(
            "2024-01-02",
            Some("10:00:00".to_string()),
            Some("Athens".to_string()),
            "delivered",
            Some("Delivered".to_string()),
        )];
        TrackingResult::completed(
            self.key,
            self.name,
            tracking_number,
            "Delivered",
            StatusCategory::Delivered,
            events,
        )
    }

    fn parse(&self, tracking_number: &str, _payload: &serde_json::Value) -> TrackingResult {
        TrackingResult::not_found(self.key, self.name, tracking_number)
    }
}
