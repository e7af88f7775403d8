//! Error types for the tracking system
//!
//! This module defines all error types used throughout the crate.
//!
//! None of these errors cross the adapter or engine boundary as unhandled
//! faults: adapters and the engine catch them and convert them into failure
//! [`TrackingResult`](crate::model::TrackingResult)s. "Parcel not found" is
//! not an error at all; carriers that affirmatively report an unknown parcel
//! produce a successful result with status "Not Found".

use thiserror::Error;

/// Result type alias for tracking operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the tracking system
#[derive(Error, Debug)]
pub enum Error {
    /// Connection or timeout failure while talking to a carrier
    #[error("transport error: {0}")]
    Transport(String),

    /// Carrier endpoint answered with a non-2xx status
    #[error("HTTP status {status}: {body}")]
    HttpStatus {
        /// The HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// Response body is not valid or expected structured data
    #[error("decode error: {0}")]
    Decode(String),

    /// Explicit hint or detection failed to resolve an adapter
    #[error("unknown courier: {0}")]
    UnknownCourier(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an unknown courier error
    pub fn unknown_courier(msg: impl Into<String>) -> Self {
        Self::UnknownCourier(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
