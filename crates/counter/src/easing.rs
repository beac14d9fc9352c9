//! Easing curves for the count-up.

/// Cubic ease-out: `(t - 1)^3 + 1`.
///
/// Fast start, decelerating into the final value. `t` is clamped to [0, 1],
/// so early or late frame timestamps never overshoot.
pub fn ease_out_cubic(t: f64) -> f64 {
    let u = t.clamp(0.0, 1.0) - 1.0;
    u * u * u + 1.0
}
