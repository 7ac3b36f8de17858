//! Layout calculator: bounded drawing area from outer size and margins.
//!
//! The outer size is the whole chart surface; margins reserve space for
//! axes and labels. Everything data-driven is positioned inside the
//! bounded area. Bounded sizes clamp at zero when margins exceed the
//! outer size, never going negative.

use crate::geometry::{Point, Rect};

/// Margins around the bounded drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margin {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Margin {
    /// Create a margin from the four sides.
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    /// Same margin on all four sides.
    #[must_use]
    pub const fn uniform(m: f64) -> Self {
        Self::new(m, m, m, m)
    }
}

/// Outer chart dimensions plus margins, with derived bounded sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    /// Outer width.
    pub width: f64,
    /// Outer height.
    pub height: f64,
    /// Margins reserved around the bounded area.
    pub margin: Margin,
}

impl Dimensions {
    /// Create dimensions from outer size and margins.
    #[must_use]
    pub const fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self { width, height, margin }
    }

    /// Width of the bounded drawing area, clamped at zero.
    #[must_use]
    pub fn bounded_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Height of the bounded drawing area, clamped at zero.
    #[must_use]
    pub fn bounded_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Radius of the bounded area for radial charts, clamped at zero.
    ///
    /// Half the smaller outer side, less the average horizontal margin.
    #[must_use]
    pub fn bounded_radius(&self) -> f64 {
        let radius = self.width.min(self.height) / 2.0;
        (radius - (self.margin.left + self.margin.right) / 2.0).max(0.0)
    }

    /// The bounded drawing area as a rectangle in outer coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.margin.left, self.margin.top, self.bounded_width(), self.bounded_height())
    }

    /// Point on the bounded radius at `angle` (radians from 12 o'clock),
    /// relative to the radial chart center. `offset` scales the radius,
    /// e.g. 1.4 places labels outside the outermost ring.
    #[must_use]
    pub fn radial_point(&self, angle: f64, offset: f64) -> Point {
        Point::from_polar(angle, self.bounded_radius() * offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounded_size() {
        let dims = Dimensions::new(600.0, 540.0, Margin::new(30.0, 10.0, 50.0, 50.0));
        assert_relative_eq!(dims.bounded_width(), 540.0);
        assert_relative_eq!(dims.bounded_height(), 460.0);
    }

    #[test]
    fn test_bounded_width_clamps_to_zero() {
        // 100x50 outer with 60px left and right margins -> 0, not -20
        let dims = Dimensions::new(100.0, 50.0, Margin::new(0.0, 60.0, 0.0, 60.0));
        assert_eq!(dims.bounded_width(), 0.0);
        assert_eq!(dims.bounded_height(), 50.0);
    }

    #[test]
    fn test_bounded_height_clamps_to_zero() {
        let dims = Dimensions::new(100.0, 50.0, Margin::new(40.0, 0.0, 40.0, 0.0));
        assert_eq!(dims.bounded_height(), 0.0);
    }

    #[test]
    fn test_bounds_rect() {
        let dims = Dimensions::new(600.0, 600.0, Margin::new(120.0, 120.0, 120.0, 120.0));
        let bounds = dims.bounds();
        assert_eq!(bounds.x, 120.0);
        assert_eq!(bounds.y, 120.0);
        assert_relative_eq!(bounds.width, 360.0);
        assert_relative_eq!(bounds.height, 360.0);
    }

    #[test]
    fn test_bounded_radius() {
        // Radar chart dimensions: 600 square, 120px margins all around
        let dims = Dimensions::new(600.0, 600.0, Margin::uniform(120.0));
        assert_relative_eq!(dims.bounded_radius(), 180.0);
    }

    #[test]
    fn test_bounded_radius_clamps_to_zero() {
        let dims = Dimensions::new(100.0, 100.0, Margin::uniform(80.0));
        assert_eq!(dims.bounded_radius(), 0.0);
    }

    #[test]
    fn test_radial_point() {
        let dims = Dimensions::new(600.0, 600.0, Margin::uniform(120.0));
        // Quarter turn, radius scaled by 1.0: due right of center
        let p = dims.radial_point(std::f64::consts::FRAC_PI_2, 1.0);
        assert_relative_eq!(p.x, 180.0);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_margin_uniform() {
        let m = Margin::uniform(7.0);
        assert_eq!(m, Margin::new(7.0, 7.0, 7.0, 7.0));
    }
}
