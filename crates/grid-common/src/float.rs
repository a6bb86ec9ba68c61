//! Tolerance-based float comparison for redundant value validation.

/// Relative tolerance used by [`allclose`].
pub const RTOL: f64 = 1e-5;
/// Absolute tolerance used by [`allclose`].
pub const ATOL: f64 = 1e-8;

/// Element-wise tolerance comparison of two numeric slices.
///
/// Two NaN values compare equal, so a field that was legitimately
/// undefined on both sides does not register as a conflict. Slices of
/// different lengths never compare equal.
pub fn allclose(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(&x, &y)| close(x, y))
}

fn close(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= ATOL + RTOL * b.abs()
}
