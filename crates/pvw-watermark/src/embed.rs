//! # Embedding
//!
//! Appends a seed-derived marker to text. The marker is a zero-width space
//! followed by `[wm:<tag>]`, where the tag fingerprints the seed; the
//! visible content is untouched.

use pvw_crypto::Seed;

use crate::tag::WatermarkTag;

/// Embeds a seed-bound watermark into text.
///
/// Object-safe so callers can swap schemes behind `Arc<dyn Embedder>`; the
/// shipped implementation is [`crate::TagWatermark`].
pub trait Embedder: Send + Sync {
    /// Produce the watermarked form of `text` under `seed`, alongside the
    /// tag that was embedded. Deterministic per (text, seed).
    fn embed(&self, text: &str, seed: &Seed) -> (String, WatermarkTag);
}
