//! Geometry of the dimmed border around the viewport's safe zone.
//!
//! The overlay is purely visual: it never clamps the pan range and never
//! touches the stored transform.

use kurbo::{Rect, Size};

pub const DEFAULT_MARGIN: f64 = 0.1;

/// The four dimmed bands and the clear centre of a viewport.
///
/// Top and bottom span the full width; left and right fill the height
/// between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeZone {
    pub top: Rect,
    pub bottom: Rect,
    pub left: Rect,
    pub right: Rect,
    pub clear: Rect,
}

impl SafeZone {
    /// `margin` is the fraction of each dimension covered by one band,
    /// clamped to `[0, 0.5]`.
    pub fn compute(container: Size, margin: f64) -> Self {
        let margin = if margin.is_finite() {
            margin.clamp(0.0, 0.5)
        } else {
            DEFAULT_MARGIN
        };
        let (w, h) = (container.width.max(0.0), container.height.max(0.0));
        let band_h = h * margin;
        let band_w = w * margin;
        let clear = Rect::new(band_w, band_h, w - band_w, h - band_h);
        Self {
            top: Rect::new(0.0, 0.0, w, band_h),
            bottom: Rect::new(0.0, h - band_h, w, h),
            left: Rect::new(0.0, band_h, band_w, h - band_h),
            right: Rect::new(w - band_w, band_h, w, h - band_h),
            clear,
        }
    }

    pub fn bands(&self) -> [Rect; 4] {
        [self.top, self.bottom, self.left, self.right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_percent_margin() {
        let zone = SafeZone::compute(Size::new(1000.0, 500.0), DEFAULT_MARGIN);
        assert_eq!(zone.clear, Rect::new(100.0, 50.0, 900.0, 450.0));
        assert_eq!(zone.top.height(), 50.0);
        assert_eq!(zone.left.width(), 100.0);
        assert_eq!(zone.left.height(), 400.0);
    }

    #[test]
    fn test_bands_and_clear_cover_the_viewport() {
        let size = Size::new(640.0, 480.0);
        let zone = SafeZone::compute(size, 0.15);
        let covered: f64 = zone.bands().iter().map(|r| r.area()).sum::<f64>() + zone.clear.area();
        assert!((covered - size.area()).abs() < 1e-6);
    }

    #[test]
    fn test_margin_is_clamped() {
        let zone = SafeZone::compute(Size::new(100.0, 100.0), 0.9);
        assert_eq!(zone.clear.area(), 0.0);
        let zone = SafeZone::compute(Size::new(100.0, 100.0), f64::NAN);
        assert_eq!(zone.clear, Rect::new(10.0, 10.0, 90.0, 90.0));
    }
}
