//! Angle utilities shared by the accumulators and the intersection logic.

/// Number of uniform bins of width `step` needed to cover `[0, span)`.
///
/// A bin count that is within rounding noise of an integer is snapped to it,
/// so `span = π, step = π/180` yields exactly 180 bins.
#[inline]
pub fn bin_count(span: f32, step: f32) -> usize {
    let n = span / step;
    (n - 1e-3).ceil().max(1.0) as usize
}

/// Computes the smallest unsigned angular difference between two angles,
/// treating antipodal directions as equivalent (i.e. π apart → 0).
#[inline]
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let mut diff = (a - b).abs();
    if diff > std::f32::consts::PI {
        diff = diff.rem_euclid(std::f32::consts::PI);
    }
    if diff > std::f32::consts::FRAC_PI_2 {
        std::f32::consts::PI - diff
    } else {
        diff
    }
}

/// Signed cosine of the angle between two direction vectors.
///
/// Returns `None` when either vector has zero length, since the angle is
/// undefined there.
#[inline]
pub fn direction_cosine(a: &[f32; 2], b: &[f32; 2]) -> Option<f32> {
    let dot = a[0] * b[0] + a[1] * b[1];
    let na = (a[0] * a[0] + a[1] * a[1]).sqrt();
    let nb = (b[0] * b[0] + b[1] * b[1]).sqrt();
    if na <= f32::EPSILON || nb <= f32::EPSILON {
        return None;
    }
    Some((dot / (na * nb)).clamp(-1.0, 1.0))
}
