//! # Tag Scheme
//!
//! The reference watermark: a trailing marker carrying the seed's tag.
//! Embedding appends `U+200B [wm:<tag>]`; seed-bound detection requires the
//! exact tag, commitment detection only the `[wm:` pattern.

use pvw_core::Commitment;
use pvw_crypto::Seed;

use crate::detect::{DetectionResult, Detector};
use crate::embed::Embedder;
use crate::tag::{WatermarkTag, MARKER_PREFIX};

/// The trailing-marker watermark scheme.
#[derive(Debug, Default, Clone, Copy)]
pub struct TagWatermark;

impl TagWatermark {
    pub fn new() -> Self {
        Self
    }
}

impl Embedder for TagWatermark {
    fn embed(&self, text: &str, seed: &Seed) -> (String, WatermarkTag) {
        let tag = WatermarkTag::from_seed(seed);
        (format!("{text}{}", tag.marker()), tag)
    }
}

impl Detector for TagWatermark {
    fn detect_with_seed(&self, content: &str, seed: &Seed) -> DetectionResult {
        let tag = WatermarkTag::from_seed(seed);
        if content.contains(&tag.marker_body()) {
            DetectionResult::hit()
        } else {
            DetectionResult::miss()
        }
    }

    fn detect_with_commitment(&self, content: &str, _commitment: &Commitment) -> DetectionResult {
        if content.contains(MARKER_PREFIX) {
            DetectionResult::hit()
        } else {
            DetectionResult::miss()
        }
    }
}
