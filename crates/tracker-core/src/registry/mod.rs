//! Plugin-based courier registry and tracking-number detector
//!
//! The registry allows courier adapters to be registered dynamically at
//! runtime, avoiding hardcoded if-else chains, and answers the question
//! "which carrier issued this tracking number?".
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tracker_core::registry::CourierRegistry;
//! use tracker_core::config::CourierConfig;
//!
//! let registry = CourierRegistry::new();
//!
//! // Register factories (each courier crate exposes a `register` function)
//! tracker_courier_elta::register(&registry);
//!
//! // Instantiate adapters from config, in detection order
//! registry.create_courier(&CourierConfig::Elta { endpoint: None })?;
//!
//! assert_eq!(registry.detect("SE101046219GR"), Some("elta"));
//! ```
//!
//! ## Detection
//!
//! Adapters are evaluated in registration order; the first whose `matches`
//! claims the normalized number wins. Order is only a tie-break for
//! overlapping grammars; there is no ambiguity resolution beyond it.
//!
//! A secondary, coarser rule set classifies numbers that belong to carriers
//! without a registered adapter (see [`FALLBACK_RULES`]). These keys are
//! surfaced only by the detector: no adapter's `matches` claims them, and
//! resolving them to an adapter fails with `UnknownCourier`.

use crate::config::CourierConfig;
use crate::error::{Error, Result};
use crate::model::normalize_tracking_number;
use crate::traits::{CourierAdapter, CourierFactory};
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

/// Detector-only classification rules, evaluated after all adapters.
///
/// Each rule pairs a tracking-number grammar with the carrier key it hints
/// at. The keys carry no guarantee that a working adapter exists.
static FALLBACK_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"^CC\d{8,10}$", "courier_center"),
        (r"^SP\d{8,10}$", "speedex"),
        // Bare ten-digit numbers are conventionally ACS shipments
        (r"^\d{10}$", "acs"),
    ]
    .into_iter()
    .map(|(pattern, key)| {
        (
            Regex::new(pattern).expect("fallback pattern compiles"),
            key,
        )
    })
    .collect()
});

/// Courier registry and tracking-number detector
///
/// The registry maintains a map of courier type names to factory objects
/// for config-driven instantiation, and an ordered list of live adapters
/// used for detection and dispatch.
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct CourierRegistry {
    /// Registered courier factories
    factories: RwLock<HashMap<String, Box<dyn CourierFactory>>>,

    /// Instantiated adapters, in detection order
    adapters: RwLock<Vec<Arc<dyn CourierAdapter>>>,
}

impl CourierRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a courier factory
    ///
    /// # Parameters
    ///
    /// - `name`: Courier type name (e.g. "elta", "box_now")
    /// - `factory`: Factory object for creating adapter instances
    pub fn register_factory(&self, name: impl Into<String>, factory: Box<dyn CourierFactory>) {
        let name = name.into();
        let mut factories = self.factories.write().unwrap();
        factories.insert(name, factory);
    }

    /// Create a courier adapter from configuration and register it
    ///
    /// The adapter is appended to the detection order (or replaces an
    /// existing adapter with the same key, keeping its position).
    ///
    /// # Returns
    ///
    /// - `Ok(Arc<dyn CourierAdapter>)`: The created adapter, also registered
    /// - `Err(Error)`: If the courier type is not registered or creation fails
    pub fn create_courier(&self, config: &CourierConfig) -> Result<Arc<dyn CourierAdapter>> {
        let courier_type = config.type_name();
        let factories = self.factories.read().unwrap();

        let factory = factories
            .get(courier_type)
            .ok_or_else(|| Error::config(format!("unknown courier type: {}", courier_type)))?;

        let adapter = factory.create(config)?;
        drop(factories);

        self.register_adapter(adapter.clone());
        Ok(adapter)
    }

    /// Register an already-constructed adapter
    ///
    /// Re-registering a key replaces the previous adapter in place, so the
    /// detection order stays stable.
    pub fn register_adapter(&self, adapter: Arc<dyn CourierAdapter>) {
        let mut adapters = self.adapters.write().unwrap();
        match adapters
            .iter()
            .position(|existing| existing.courier_key() == adapter.courier_key())
        {
            Some(index) => adapters[index] = adapter,
            None => adapters.push(adapter),
        }
    }

    /// Detect the carrier that issued a tracking number
    ///
    /// Normalizes the input, then evaluates each registered adapter's
    /// `matches` in order, returning the first hit. Numbers no adapter
    /// claims are classified by the detector-only fallback rules.
    ///
    /// # Returns
    ///
    /// The carrier key, or `None` if no adapter and no fallback rule claims
    /// the number.
    pub fn detect(&self, tracking_number: &str) -> Option<&'static str> {
        let normalized = normalize_tracking_number(tracking_number);

        let adapters = self.adapters.read().unwrap();
        for adapter in adapters.iter() {
            if adapter.matches(&normalized) {
                return Some(adapter.courier_key());
            }
        }
        drop(adapters);

        FALLBACK_RULES
            .iter()
            .find(|(pattern, _)| pattern.is_match(&normalized))
            .map(|(_, key)| *key)
    }

    /// Get the registered adapter for a carrier key
    ///
    /// Detector-only fallback keys have no adapter and return `None`.
    pub fn get(&self, courier_key: &str) -> Option<Arc<dyn CourierAdapter>> {
        let adapters = self.adapters.read().unwrap();
        adapters
            .iter()
            .find(|adapter| adapter.courier_key() == courier_key)
            .cloned()
    }

    /// List all registered carrier keys, in detection order
    pub fn list_couriers(&self) -> Vec<&'static str> {
        let adapters = self.adapters.read().unwrap();
        adapters.iter().map(|adapter| adapter.courier_key()).collect()
    }

    /// Check if an adapter is registered for a carrier key
    pub fn has_courier(&self, courier_key: &str) -> bool {
        self.get(courier_key).is_some()
    }
}
