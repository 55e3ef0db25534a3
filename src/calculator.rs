//! Pure integer arithmetic used by the event reports.
//!
//! Push processing rolls commit line counts up through [`add`] and derives
//! the net delta through [`subtract`]. Both operations are plain arithmetic
//! over `i64`: deterministic, side-effect free, no validation.

/// Returns the arithmetic sum of `a` and `b`.
#[must_use]
pub fn add(a: i64, b: i64) -> i64 {
    a + b
}

/// Returns `a - b`.
#[must_use]
pub fn subtract(a: i64, b: i64) -> i64 {
    a - b
}
