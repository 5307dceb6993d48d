//! Confidence helpers
//!
//! A single default is used everywhere a confidence is missing: for a clause
//! the model returned without one, and for a document that produced no
//! clauses at all.

/// Confidence assumed when none is available
pub const DEFAULT_CONFIDENCE: f64 = 0.8;

/// Check that a value is a usable confidence (finite and within [0, 1])
pub fn is_valid(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

/// Force a value into [0, 1], mapping NaN to the default
pub fn clamp(value: f64) -> f64 {
    if value.is_nan() {
        return DEFAULT_CONFIDENCE;
    }
    value.clamp(0.0, 1.0)
}
