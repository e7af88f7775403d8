//! Core tracking engine
//!
//! The TrackingEngine is responsible for:
//! - Resolving a tracking number to a courier adapter (explicit hint or
//!   registry detection)
//! - Dispatching the adapter under one bounded overall timeout
//! - Converting every resolution failure into the same failure shape the
//!   adapters use
//!
//! ## Control Flow
//!
//! ```text
//! caller ──▶ TrackingEngine::track(number, hint?)
//!                     │
//!                     ▼
//!          CourierRegistry::detect(number)      (skipped when hint given)
//!                     │
//!                     ▼
//!          CourierAdapter::track(number)        (one outbound call,
//!                     │                          bounded by timeout)
//!                     ▼
//!              TrackingResult ──▶ caller
//! ```
//!
//! Each call is independent and stateless; concurrent calls share nothing
//! but the registry's read lock and the transport layer's connection pool.
//! A timeout aborts only its own call.

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::model::{TrackingResult, normalize_tracking_number};
use crate::registry::CourierRegistry;
use crate::traits::CourierAdapter;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Core tracking engine
///
/// The engine orchestrates the tracking-number → adapter → uniform-result
/// flow. It holds no per-call state and supports unbounded concurrent
/// invocations.
pub struct TrackingEngine {
    /// Courier registry for detection and dispatch
    registry: Arc<CourierRegistry>,

    /// Overall bound on one tracking call, measured from request dispatch
    timeout: Duration,
}

impl TrackingEngine {
    /// Create a new tracking engine
    ///
    /// # Parameters
    ///
    /// - `registry`: Courier registry with adapters already registered
    /// - `config`: Engine configuration (validated here)
    pub fn new(registry: Arc<CourierRegistry>, config: EngineConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            registry,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Create an engine with the default configuration (30 second timeout)
    pub fn with_defaults(registry: Arc<CourierRegistry>) -> Self {
        Self {
            registry,
            timeout: Duration::from_secs(EngineConfig::default().timeout_secs),
        }
    }

    /// Detect the carrier that issued a tracking number
    ///
    /// Passthrough to [`CourierRegistry::detect`]; performs no I/O.
    pub fn detect(&self, tracking_number: &str) -> Option<&'static str> {
        self.registry.detect(tracking_number)
    }

    /// Track a parcel
    ///
    /// Resolution order: an explicit `courier` hint resolves directly
    /// against the registry; otherwise the registry detects the carrier from
    /// the number. Either way, an unresolvable number yields a failure
    /// result without any outbound call. The resolved adapter runs under the
    /// engine timeout; elapse is treated identically to any other transport
    /// failure.
    ///
    /// Always returns a well-formed [`TrackingResult`], never an error, for
    /// any input string.
    pub async fn track(&self, tracking_number: &str, courier: Option<&str>) -> TrackingResult {
        let number = normalize_tracking_number(tracking_number);

        let adapter = match self.resolve(&number, courier) {
            Ok(adapter) => adapter,
            Err(failure) => return *failure,
        };

        info!(
            "dispatching {} to {} (timeout {:?})",
            number,
            adapter.courier_key(),
            self.timeout
        );

        match tokio::time::timeout(self.timeout, adapter.track(&number)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "tracking {} via {} timed out after {:?}",
                    number,
                    adapter.courier_key(),
                    self.timeout
                );
                TrackingResult::failure(
                    adapter.courier_key(),
                    adapter.courier_name(),
                    &number,
                    format!("timed out after {} seconds", self.timeout.as_secs()),
                )
            }
        }
    }

    /// Resolve a normalized number to an adapter, or to the failure result
    /// the caller should receive.
    fn resolve(
        &self,
        number: &str,
        courier: Option<&str>,
    ) -> std::result::Result<Arc<dyn CourierAdapter>, Box<TrackingResult>> {
        match courier {
            Some(key) => self.registry.get(key).ok_or_else(|| {
                warn!("explicit courier '{}' is not registered", key);
                Box::new(TrackingResult::failure(
                    key,
                    key,
                    number,
                    Error::unknown_courier(key).to_string(),
                ))
            }),
            None => match self.registry.detect(number) {
                Some(key) => self.registry.get(key).ok_or_else(|| {
                    // Detector-only classification hint without a working
                    // adapter (e.g. the generic ten-digit rule).
                    debug!("detected '{}' for {} but no adapter is registered", key, number);
                    Box::new(TrackingResult::failure(
                        key,
                        key,
                        number,
                        format!("no adapter registered for detected courier: {}", key),
                    ))
                }),
                None => {
                    debug!("{} matched no known carrier pattern", number);
                    Err(Box::new(TrackingResult::failure(
                        "unknown",
                        "Unknown",
                        number,
                        format!("tracking number '{}' matched no known carrier pattern", number),
                    )))
                }
            },
        }
    }
}
