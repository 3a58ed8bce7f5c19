//! Pull resistance applied to the raw drag delta.
//!
//! Below the threshold the content follows the finger one-to-one. Past the
//! threshold every further pixel of drag only moves the content by
//! [`PULL_RESISTANCE`] pixels, which makes the pull feel heavier once the
//! refresh point has been reached.

/// Fraction of the drag beyond the threshold that is applied to the distance.
pub const PULL_RESISTANCE: f32 = 0.2;

/// Maps a raw downward drag delta to the damped pull distance.
///
/// Linear up to `threshold`, then `threshold + (delta - threshold) * 0.2`.
/// Both branches agree at `delta == threshold`, so the curve is continuous
/// and strictly increasing.
#[inline]
pub fn damp(delta: f32, threshold: f32) -> f32 {
    if delta <= threshold {
        delta
    } else {
        threshold + (delta - threshold) * PULL_RESISTANCE
    }
}
