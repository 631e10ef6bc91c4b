//! # Temporal Types — Epoch-Millisecond Timestamps
//!
//! Defines `TimestampMs`, the UTC epoch-millisecond timestamp carried by
//! every ledger record and receipt.
//!
//! ## Canonicalization
//!
//! Timestamps serialize as JSON integers, which pass the canonical
//! pipeline's number rules unchanged (integers are JCS-safe; floats are
//! not). A string or sub-integer representation would produce different
//! canonical bytes for the same instant across implementations.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A UTC timestamp in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimestampMs(pub u64);

impl TimestampMs {
    /// Current UTC time in epoch milliseconds.
    pub fn now() -> Self {
        // timestamp_millis() is non-negative for any date after 1970.
        Self(Utc::now().timestamp_millis().max(0) as u64)
    }

    /// Construct from a raw epoch-millisecond value.
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// The raw epoch-millisecond value.
    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimestampMs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
