//! # pvw-watermark
//!
//! Seed-bound text watermarking: embed a marker derived from a secret seed,
//! later detect it either with the recomputed seed (strong) or by pattern
//! presence against a commitment (weak).
//!
//! The embedding scheme is intentionally simple — a zero-width-space-led
//! `[wm:<tag>]` suffix where the tag fingerprints the seed. What matters
//! for attestation is the binding: only a party that can re-derive the seed
//! can predict the tag, and the detector interface keeps the seed out of
//! every result it returns.

pub mod detect;
pub mod embed;
pub mod scheme;
pub mod tag;

pub use detect::{
    DetectionResult, Detector, DECISION_MAX_PVALUE, DECISION_MIN_STATISTIC,
};
pub use embed::Embedder;
pub use scheme::TagWatermark;
pub use tag::WatermarkTag;
