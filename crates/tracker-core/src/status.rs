//! Shared status vocabulary
//!
//! Carriers disagree on everything: field names, date formats, and above all
//! status wording. Every courier adapter must map its carrier's native status
//! text into exactly one [`StatusCategory`] using a small per-carrier keyword
//! table and [`categorize`]. Unrecognized text maps to
//! [`StatusCategory::Unknown`], never to an error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed, carrier-independent classification of a shipment's current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    /// The parcel has reached its recipient
    Delivered,
    /// The parcel is somewhere between acceptance and delivery
    InTransit,
    /// The carrier's status text could not be classified, or the parcel is
    /// unknown to the carrier
    Unknown,
    /// The tracking attempt itself failed
    Error,
}

impl StatusCategory {
    /// Stable machine-readable name, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::Delivered => "delivered",
            StatusCategory::InTransit => "in_transit",
            StatusCategory::Unknown => "unknown",
            StatusCategory::Error => "error",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify carrier status text against a per-carrier keyword table.
///
/// Matching is case-insensitive substring containment; the first matching
/// keyword wins. Keywords in the table must be lowercase.
///
/// # Example
///
/// ```
/// use tracker_core::status::{categorize, StatusCategory};
///
/// const KEYWORDS: &[(&str, StatusCategory)] = &[
///     ("delivered", StatusCategory::Delivered),
///     ("transit", StatusCategory::InTransit),
/// ];
///
/// assert_eq!(categorize("Delivered to recipient", KEYWORDS), StatusCategory::Delivered);
/// assert_eq!(categorize("Held at customs", KEYWORDS), StatusCategory::Unknown);
/// ```
pub fn categorize(status: &str, keywords: &[(&str, StatusCategory)]) -> StatusCategory {
    let lowered = status.to_lowercase();
    for (needle, category) in keywords {
        if lowered.contains(needle) {
            return *category;
        }
    }
    StatusCategory::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYWORDS: &[(&str, StatusCategory)] = &[
        ("delivered", StatusCategory::Delivered),
        ("παραδόθηκε", StatusCategory::Delivered),
        ("transit", StatusCategory::InTransit),
    ];

    #[test]
    fn test_categorize_is_case_insensitive() {
        assert_eq!(categorize("DELIVERED", KEYWORDS), StatusCategory::Delivered);
        assert_eq!(categorize("In Transit", KEYWORDS), StatusCategory::InTransit);
    }

    #[test]
    fn test_categorize_matches_substrings() {
        assert_eq!(
            categorize("Αποστολή παραδόθηκε σε παραλήπτη", KEYWORDS),
            StatusCategory::Delivered
        );
    }

    #[test]
    fn test_categorize_unrecognized_is_unknown() {
        assert_eq!(categorize("Held at customs", KEYWORDS), StatusCategory::Unknown);
        assert_eq!(categorize("", KEYWORDS), StatusCategory::Unknown);
    }

    #[test]
    fn test_as_str_matches_serde_representation() {
        let json = serde_json::to_string(&StatusCategory::InTransit).unwrap();
        assert_eq!(json, format!("\"{}\"", StatusCategory::InTransit.as_str()));
    }
}
