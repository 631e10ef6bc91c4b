//! # Detection
//!
//! Two detection strengths:
//!
//! - **Seed-bound** ([`Detector::detect_with_seed`]): recomputes the
//!   expected tag from the seed and requires the exact marker. A forged
//!   marker with the wrong tag does not verify.
//! - **Presence-only** ([`Detector::detect_with_commitment`]): checks that
//!   *some* marker pattern exists. Used when only a commitment is available
//!   and the seed cannot be recomputed; callers record the weaker policy
//!   version.
//!
//! The detector reports a test statistic and p-value. The shipped scheme is
//! a deterministic indicator (hit: statistic 1.0, p 0.01; miss: 0.0, 1.0),
//! but the result shape leaves room for detectors that accumulate evidence
//! over token distributions.

use serde::Serialize;

use pvw_core::Commitment;
use pvw_crypto::Seed;

/// Statistic reported on a confirmed detection.
pub const STATISTIC_HIT: f64 = 1.0;
/// P-value reported on a confirmed detection.
pub const PVALUE_HIT: f64 = 0.01;
/// Statistic reported when the watermark is absent.
pub const STATISTIC_MISS: f64 = 0.0;
/// P-value reported when the watermark is absent.
pub const PVALUE_MISS: f64 = 1.0;

/// Minimum statistic for a positive decision.
pub const DECISION_MIN_STATISTIC: f64 = 1.0;
/// Maximum p-value for a positive decision.
pub const DECISION_MAX_PVALUE: f64 = 0.05;

/// Outcome of a detection run.
///
/// Serializes for response payloads only — detection numbers bound for the
/// ledger go through the record types, which carry them as decimal strings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectionResult {
    /// Test statistic; higher means stronger evidence of the mark.
    pub statistic: f64,
    /// Probability of the observed statistic under the no-mark hypothesis.
    pub pvalue: f64,
    /// Whether the detector found the mark it was looking for.
    pub present: bool,
}

impl DetectionResult {
    /// A confirmed detection under the indicator scheme.
    pub fn hit() -> Self {
        Self {
            statistic: STATISTIC_HIT,
            pvalue: PVALUE_HIT,
            present: true,
        }
    }

    /// An absent mark under the indicator scheme.
    pub fn miss() -> Self {
        Self {
            statistic: STATISTIC_MISS,
            pvalue: PVALUE_MISS,
            present: false,
        }
    }

    /// The verification decision: statistic at or above
    /// [`DECISION_MIN_STATISTIC`] with p-value at or below
    /// [`DECISION_MAX_PVALUE`].
    pub fn decision(&self) -> bool {
        self.statistic >= DECISION_MIN_STATISTIC && self.pvalue <= DECISION_MAX_PVALUE
    }
}

/// Detects watermarks in text.
///
/// Object-safe counterpart to [`crate::Embedder`]; the shipped
/// implementation is [`crate::TagWatermark`].
pub trait Detector: Send + Sync {
    /// Seed-bound detection: requires the exact marker for this seed's tag.
    fn detect_with_seed(&self, content: &str, seed: &Seed) -> DetectionResult;

    /// Presence-only detection against a commitment.
    ///
    /// The commitment cannot reproduce the seed, so implementations can only
    /// check for the generic mark pattern; `present` reflects that weaker
    /// test.
    fn detect_with_commitment(&self, content: &str, commitment: &Commitment) -> DetectionResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::Embedder;
    use crate::scheme::TagWatermark;
    use pvw_core::Ticket;
    use pvw_crypto::{derive_seed, ServerSalt};

    fn seed_for(nonce: &str) -> Seed {
        let salt = ServerSalt::from_bytes([0x11; 32]);
        let ticket = Ticket::new("alice", "/issue", "00".repeat(32), nonce, 8);
        derive_seed(&ticket, &salt).unwrap()
    }

    fn commitment() -> Commitment {
        Commitment::parse(&"ab".repeat(32)).unwrap()
    }

    #[test]
    fn embedded_text_detects_with_matching_seed() {
        let seed = seed_for("1");
        let (marked, _) = TagWatermark::new().embed("the quick brown fox", &seed);
        let result = TagWatermark::new().detect_with_seed(&marked, &seed);
        assert!(result.present);
        assert_eq!(result.statistic, STATISTIC_HIT);
        assert_eq!(result.pvalue, PVALUE_HIT);
        assert!(result.decision());
    }

    #[test]
    fn wrong_seed_does_not_detect() {
        let (marked, _) = TagWatermark::new().embed("content", &seed_for("1"));
        let result = TagWatermark::new().detect_with_seed(&marked, &seed_for("2"));
        assert!(!result.present);
        assert_eq!(result.statistic, STATISTIC_MISS);
        assert_eq!(result.pvalue, PVALUE_MISS);
        assert!(!result.decision());
    }

    #[test]
    fn unmarked_text_does_not_detect() {
        let result = TagWatermark::new().detect_with_seed("plain text", &seed_for("1"));
        assert!(!result.present);
        assert!(!result.decision());
    }

    #[test]
    fn detection_survives_stripped_zero_width_space() {
        let seed = seed_for("1");
        let (marked, _) = TagWatermark::new().embed("survives", &seed);
        let stripped: String = marked.chars().filter(|c| *c != '\u{200b}').collect();
        assert!(TagWatermark::new()
            .detect_with_seed(&stripped, &seed)
            .present);
    }

    #[test]
    fn commitment_path_matches_any_marker() {
        let scheme = TagWatermark::new();
        let (marked, _) = scheme.embed("anything", &seed_for("9"));
        assert!(scheme.detect_with_commitment(&marked, &commitment()).present);
        assert!(
            scheme
                .detect_with_commitment("spoofed [wm:0000000000000000]", &commitment())
                .present
        );
        assert!(
            !scheme
                .detect_with_commitment("no marker here", &commitment())
                .present
        );
    }

    #[test]
    fn forged_tag_fails_seed_bound_but_passes_presence() {
        let scheme = TagWatermark::new();
        let forged = "text[wm:deadbeefdeadbeef]";
        assert!(!scheme.detect_with_seed(forged, &seed_for("1")).present);
        assert!(scheme.detect_with_commitment(forged, &commitment()).present);
    }

    proptest::proptest! {
        #[test]
        fn any_text_detects_after_embedding(text in ".{0,200}") {
            let seed = seed_for("1");
            let (marked, _) = TagWatermark::new().embed(&text, &seed);
            let result = TagWatermark::new().detect_with_seed(&marked, &seed);
            proptest::prop_assert!(result.present);
            proptest::prop_assert!(result.decision());
        }
    }

    #[test]
    fn decision_thresholds() {
        let borderline = DetectionResult {
            statistic: 1.0,
            pvalue: 0.05,
            present: true,
        };
        assert!(borderline.decision());
        let weak = DetectionResult {
            statistic: 0.9,
            pvalue: 0.01,
            present: true,
        };
        assert!(!weak.decision());
    }
}
