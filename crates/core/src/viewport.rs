//! Logical viewport dimensions and device pixel ratio.

use crate::error::FxError;

/// The drawable area in logical (CSS) pixels plus the device pixel ratio.
///
/// The ratio is normalized the way browsers report it loosely: missing,
/// non-finite, or sub-1 values become `1.0`, so high-DPI scaling never
/// shrinks the backing store below the logical size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    dpr: f64,
}

impl Viewport {
    /// Creates a viewport. A zero-sized viewport is valid (minimized window)
    /// and simply holds no cells.
    ///
    /// Returns `FxError::InvalidViewport` for negative or non-finite sizes.
    pub fn new(width: f64, height: f64, dpr: f64) -> Result<Self, FxError> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(FxError::InvalidViewport { width, height, dpr });
        }
        let dpr = if dpr.is_finite() { dpr.max(1.0) } else { 1.0 };
        Ok(Self { width, height, dpr })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Normalized device pixel ratio, always `>= 1.0`.
    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    /// Logical area in square CSS pixels.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Size of the physical backing store: logical size times DPR, rounded.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).round() as u32,
            (self.height * self.dpr).round() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_logical_size() {
        let vp = Viewport::new(1280.0, 720.0, 1.0).unwrap();
        assert_eq!(vp.width(), 1280.0);
        assert_eq!(vp.height(), 720.0);
        assert_eq!(vp.area(), 1280.0 * 720.0);
    }

    #[test]
    fn dpr_below_one_is_raised_to_one() {
        let vp = Viewport::new(100.0, 100.0, 0.5).unwrap();
        assert_eq!(vp.dpr(), 1.0);
    }

    #[test]
    fn non_finite_dpr_falls_back_to_one() {
        assert_eq!(Viewport::new(10.0, 10.0, f64::NAN).unwrap().dpr(), 1.0);
        assert_eq!(Viewport::new(10.0, 10.0, f64::INFINITY).unwrap().dpr(), 1.0);
    }

    #[test]
    fn backing_size_scales_and_rounds() {
        let vp = Viewport::new(375.0, 667.0, 2.0).unwrap();
        assert_eq!(vp.backing_size(), (750, 1334));
        let vp = Viewport::new(101.0, 33.0, 1.5).unwrap();
        assert_eq!(vp.backing_size(), (152, 50));
    }

    #[test]
    fn zero_sized_viewport_is_allowed() {
        let vp = Viewport::new(0.0, 0.0, 2.0).unwrap();
        assert_eq!(vp.backing_size(), (0, 0));
    }

    #[test]
    fn negative_or_nan_size_is_rejected() {
        assert!(Viewport::new(-1.0, 10.0, 1.0).is_err());
        assert!(Viewport::new(10.0, f64::NAN, 1.0).is_err());
        assert!(Viewport::new(f64::INFINITY, 10.0, 1.0).is_err());
    }
}
