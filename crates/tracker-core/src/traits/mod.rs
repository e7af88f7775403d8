//! Core traits for the tracking system
//!
//! This module defines the abstract interfaces that all carrier
//! implementations must follow.
//!
//! - [`CourierAdapter`]: Translate one carrier's request/response format
//!   to/from the uniform result model
//! - [`CourierFactory`]: Construct adapters from configuration

pub mod courier;

pub use courier::{CourierAdapter, CourierFactory};
