//! # Watermark Tag
//!
//! The tag is the seed's public fingerprint inside marked text: the first
//! 16 hex characters of `SHA256(seed)`. Short enough to ride along in a
//! trailing marker, long enough (64 bits) that collisions between
//! independently derived seeds are not a practical concern.
//!
//! The tag reveals nothing useful about the seed — inverting it means
//! inverting SHA-256.

use sha2::{Digest, Sha256};

use pvw_core::bytes_to_hex;
use pvw_crypto::Seed;

/// Number of hex characters in a tag.
pub const TAG_HEX_LEN: usize = 16;

/// Zero-width space that opens every marker, keeping it visually silent.
pub const MARKER_LEAD: char = '\u{200b}';

/// Marker body prefix following the zero-width space.
pub const MARKER_PREFIX: &str = "[wm:";

/// Marker terminator.
pub const MARKER_SUFFIX: &str = "]";

/// A seed's public fingerprint: 16 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatermarkTag(String);

impl WatermarkTag {
    /// Derive the tag for a seed.
    pub fn from_seed(seed: &Seed) -> Self {
        let digest = Sha256::digest(seed.as_bytes());
        let mut hex = bytes_to_hex(&digest);
        hex.truncate(TAG_HEX_LEN);
        Self(hex)
    }

    /// The tag's hex form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The full marker this tag produces in text: `U+200B [wm:<tag>]`.
    pub fn marker(&self) -> String {
        format!("{MARKER_LEAD}{MARKER_PREFIX}{}{MARKER_SUFFIX}", self.0)
    }

    /// The marker body without the zero-width lead, `[wm:<tag>]`.
    ///
    /// Detection matches on this form so that text which lost the
    /// zero-width space in transit (copy-paste, normalization) still
    /// verifies.
    pub fn marker_body(&self) -> String {
        format!("{MARKER_PREFIX}{}{MARKER_SUFFIX}", self.0)
    }
}

impl std::fmt::Display for WatermarkTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
