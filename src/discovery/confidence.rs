//! Confidence normalization between fraction (0.0-1.0) and percentage scales.

/// Default threshold above which existing data is trusted without research.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.85;

/// Acceptance floor for single-property research answers.
pub const RESEARCH_ACCEPTANCE_FLOOR: u8 = 90;

/// Normalizes a confidence expressed as either a fraction (0.0-1.0) or a
/// percentage (0-100) to an integer percentage. Idempotent for already
/// normalized values >= 1.
///
/// Exactly 1.0 lands on the percentage branch and normalizes to 1 (one
/// percent), not 100. The boundary is deliberately kept as the upstream data
/// treats it; see `test_boundary_one_is_one_percent`.
pub fn normalize(confidence: f64) -> u8 {
    let percent = if confidence < 1.0 {
        confidence * 100.0
    } else {
        confidence
    };
    percent.round().clamp(0.0, 100.0) as u8
}

/// Whether a confidence clears a threshold, with both sides brought to the
/// same 0-1 scale first. Equality counts as clearing.
pub fn is_high_confidence(confidence: f64, threshold: f64) -> bool {
    as_fraction(confidence) >= as_fraction(threshold)
}

fn as_fraction(confidence: f64) -> f64 {
    if confidence < 1.0 {
        confidence
    } else {
        confidence / 100.0
    }
}
