// # tracker-core
//
// Core library for the courier tracking system.
//
// ## Architecture Overview
//
// This library provides the carrier-abstraction layer for parcel tracking:
// - **CourierAdapter**: Trait for carrier integrations (number grammar,
//   request building, response parsing)
// - **CourierRegistry**: Ordered registry of adapters plus tracking-number
//   detection
// - **TrackingEngine**: Orchestrates detection, adapter dispatch, and the
//   per-call timeout
// - **TrackingResult / TrackingEvent**: Uniform result model shared by all
//   carriers
// - **StatusCategory**: Closed, carrier-independent status taxonomy
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from carrier
//    implementations
// 2. **Plugin-Based**: Couriers are registered dynamically, no hard-coded
//    if-else chains
// 3. **Library-First**: All core functionality can be used as a library
// 4. **No Unhandled Faults**: Every failure path is converted into a
//    well-formed `TrackingResult` at the adapter or engine boundary

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod registry;
pub mod status;
pub mod traits;

// Re-export core types for convenience
pub use config::{CourierConfig, EngineConfig, TrackerConfig};
pub use engine::TrackingEngine;
pub use error::{Error, Result};
pub use model::{TrackingEvent, TrackingResult, normalize_tracking_number};
pub use registry::CourierRegistry;
pub use status::StatusCategory;
pub use traits::{CourierAdapter, CourierFactory};
