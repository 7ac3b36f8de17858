//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values (domains) to visual properties (pixel
//! positions, radii, colors). Continuous scales interpolate linearly; the
//! square-root variant interpolates in transformed space so that circle
//! *area*, not radius, is linear in value.
//!
//! A collapsed domain (`min == max`) is not an error: queries clamp to the
//! low end of the range instead of dividing by zero, so a dataset of
//! identical values still produces a usable chart.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::color::Rgba;
use crate::data::{extent, time_extent, Record};
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

// Tick step thresholds from the 1-2-5 rule: sqrt(50), sqrt(10), sqrt(2).
const E10: f64 = 7.071_067_811_865_476;
const E5: f64 = 3.162_277_660_168_379_5;
const E2: f64 = std::f64::consts::SQRT_2;

/// Round step size for roughly `count` ticks over `[start, stop]`.
///
/// Single-pass variant of the 1-2-5 rule: the raw span/count step is
/// rounded to the nearest power of ten times 1, 2, or 5.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let span = (stop - start).abs();
    if span == 0.0 {
        return 0.0;
    }
    let step0 = span / count.max(1) as f64;
    let mut step = 10f64.powf(step0.log10().floor());
    let err = step0 / step;
    if err >= E10 {
        step *= 10.0;
    } else if err >= E5 {
        step *= 5.0;
    } else if err >= E2 {
        step *= 2.0;
    }
    step
}

/// Round tick values covering `[start, stop]`, aiming for `count` ticks.
///
/// Ticks are multiples of [`tick_step`] lying inside the interval, in
/// ascending order. A collapsed interval yields the single value.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if start == stop {
        return vec![start];
    }
    let step = tick_step(start, stop, count);
    if step <= 0.0 || !step.is_finite() {
        return Vec::new();
    }
    let i0 = (start / step).ceil() as i64;
    let i1 = (stop / step).floor() as i64;
    (i0..=i1).map(|i| i as f64 * step).collect()
}

/// Expand `[min, max]` outward to multiples of the tick step.
///
/// Guarantees `min' <= min` and `max' >= max`; a collapsed interval is
/// returned unchanged.
#[must_use]
pub fn nice_bounds(min: f64, max: f64, count: usize) -> (f64, f64) {
    if min >= max {
        return (min, max);
    }
    let step = tick_step(min, max, count);
    if step <= 0.0 || !step.is_finite() {
        return (min, max);
    }
    ((min / step).floor() * step, (max / step).ceil() * step)
}

// Endpoint-exact linear interpolation: t = 0 and t = 1 reproduce the
// bounds bit-for-bit.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// A collapsed domain is accepted; queries then clamp to the low end
    /// of the range.
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        }
    }

    /// Create a scale whose domain is the accessor extent over a dataset.
    ///
    /// Empty datasets and datasets with no numeric accessor values fall
    /// back to the unit domain `[0, 1]`.
    #[must_use]
    pub fn from_data<F>(records: &[Record], accessor: F, range: (f64, f64)) -> Self
    where
        F: Fn(&Record) -> Option<f64>,
    {
        let domain = extent(records, accessor).unwrap_or_else(|| {
            debug!("no numeric values in dataset, using unit domain");
            (0.0, 1.0)
        });
        Self::new(domain, range)
    }

    /// Expand the domain outward to round bounds, aiming for `count` ticks.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let (min, max) = nice_bounds(self.domain_min, self.domain_max, count);
        Self::new((min, max), (self.range_min, self.range_max))
    }

    /// Round tick values covering the domain.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain_min, self.domain_max, count)
    }

    /// Invert the scale (range to domain).
    ///
    /// A collapsed range maps everything to the domain minimum.
    #[must_use]
    pub fn invert(&self, value: f64) -> f64 {
        if self.range_min == self.range_max {
            return self.domain_min;
        }
        let t = (value - self.range_min) / (self.range_max - self.range_min);
        lerp(self.domain_min, self.domain_max, t)
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        if self.domain_min == self.domain_max {
            return self.range_min;
        }
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        lerp(self.range_min, self.range_max, t)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Temporal scale: linear interpolation over timestamps.
///
/// Interpolation is linear in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain_min: DateTime<Utc>,
    domain_max: DateTime<Utc>,
    range_min: f64,
    range_max: f64,
}

impl TimeScale {
    /// Create a new time scale.
    #[must_use]
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> Self {
        Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        }
    }

    /// Create a scale whose domain is the timestamp extent over a dataset.
    ///
    /// Empty datasets fall back to the degenerate domain collapsed on the
    /// Unix epoch, which clamps every query to the low end of the range.
    #[must_use]
    pub fn from_data<F>(records: &[Record], accessor: F, range: (f64, f64)) -> Self
    where
        F: Fn(&Record) -> Option<DateTime<Utc>>,
    {
        let domain = time_extent(records, accessor).unwrap_or_else(|| {
            debug!("no timestamps in dataset, collapsing domain on the epoch");
            (DateTime::UNIX_EPOCH, DateTime::UNIX_EPOCH)
        });
        Self::new(domain, range)
    }
}

impl Scale<DateTime<Utc>, f64> for TimeScale {
    fn scale(&self, value: DateTime<Utc>) -> f64 {
        let min = self.domain_min.timestamp_millis() as f64;
        let max = self.domain_max.timestamp_millis() as f64;
        if min == max {
            return self.range_min;
        }
        let t = (value.timestamp_millis() as f64 - min) / (max - min);
        lerp(self.range_min, self.range_max, t)
    }

    fn domain(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Square-root scale for area-proportional radii.
///
/// Interpolates in square-root-transformed space, so the *square* of the
/// output is linear in the input: circles sized through this scale have
/// area, not radius, proportional to value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

// Sign-preserving square root, so negative domains stay monotonic.
fn signed_sqrt(v: f64) -> f64 {
    v.signum() * v.abs().sqrt()
}

impl SqrtScale {
    /// Create a new square-root scale.
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        }
    }

    /// Create a scale whose domain is the accessor extent over a dataset.
    ///
    /// Falls back to the unit domain `[0, 1]` when no numeric values exist.
    #[must_use]
    pub fn from_data<F>(records: &[Record], accessor: F, range: (f64, f64)) -> Self
    where
        F: Fn(&Record) -> Option<f64>,
    {
        let domain = extent(records, accessor).unwrap_or((0.0, 1.0));
        Self::new(domain, range)
    }
}

impl Scale<f64, f64> for SqrtScale {
    fn scale(&self, value: f64) -> f64 {
        let min = signed_sqrt(self.domain_min);
        let max = signed_sqrt(self.domain_max);
        if min == max {
            return self.range_min;
        }
        let t = (signed_sqrt(value) - min) / (max - min);
        lerp(self.range_min, self.range_max, t)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Ordinal scale: categorical values selected by index from a parallel range.
///
/// The domain is the deduplicated list of category values in first-seen
/// order. Values not present in the domain map to `None`; callers decide
/// the fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale<R> {
    domain: Vec<String>,
    range: Vec<R>,
}

impl<R> OrdinalScale<R> {
    /// Create an ordinal scale from explicit domain and range lists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lists have different lengths.
    pub fn new(domain: Vec<String>, range: Vec<R>) -> Result<Self> {
        if domain.len() != range.len() {
            return Err(Error::DomainRangeMismatch {
                domain_len: domain.len(),
                range_len: range.len(),
            });
        }
        Ok(Self { domain, range })
    }

    /// Build the domain from deduplicated accessor values in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of distinct categories does not match
    /// the range length.
    pub fn from_data<F>(records: &[Record], accessor: F, range: Vec<R>) -> Result<Self>
    where
        F: Fn(&Record) -> Option<String>,
    {
        let mut domain: Vec<String> = Vec::new();
        for value in records.iter().filter_map(&accessor) {
            if !domain.contains(&value) {
                domain.push(value);
            }
        }
        debug!(categories = domain.len(), "ordinal domain built");
        Self::new(domain, range)
    }

    /// Map a category to its range value, or `None` if not in the domain.
    #[must_use]
    pub fn scale(&self, value: &str) -> Option<&R> {
        self.domain.iter().position(|d| d == value).map(|i| &self.range[i])
    }

    /// The deduplicated category list, in first-seen order.
    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// The parallel range values.
    #[must_use]
    pub fn range(&self) -> &[R] {
        &self.range
    }
}

/// Color scale mapping a continuous domain onto interpolated color stops.
///
/// Queries outside the domain clamp to the end colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<Rgba>,
    domain_min: f64,
    domain_max: f64,
}

impl ColorScale {
    /// Create a new color scale.
    ///
    /// # Errors
    ///
    /// Returns an error if no color stops are given.
    pub fn new(stops: Vec<Rgba>, domain: (f64, f64)) -> Result<Self> {
        if stops.is_empty() {
            return Err(Error::ScaleDomain("color scale requires at least one stop".to_string()));
        }
        Ok(Self { stops, domain_min: domain.0, domain_max: domain.1 })
    }

    /// Sequential blue scale.
    #[must_use]
    pub fn blues(domain: (f64, f64)) -> Self {
        Self {
            stops: vec![
                Rgba::rgb(247, 251, 255),
                Rgba::rgb(198, 219, 239),
                Rgba::rgb(107, 174, 214),
                Rgba::rgb(33, 113, 181),
                Rgba::rgb(8, 48, 107),
            ],
            domain_min: domain.0,
            domain_max: domain.1,
        }
    }

    /// Diverging red-to-blue scale, neutral at the domain midpoint.
    #[must_use]
    pub fn red_blue(domain: (f64, f64)) -> Self {
        Self {
            stops: vec![
                Rgba::rgb(178, 24, 43),
                Rgba::rgb(239, 138, 98),
                Rgba::rgb(247, 247, 247),
                Rgba::rgb(103, 169, 207),
                Rgba::rgb(33, 102, 172),
            ],
            domain_min: domain.0,
            domain_max: domain.1,
        }
    }
}

impl Scale<f64, Rgba> for ColorScale {
    fn scale(&self, value: f64) -> Rgba {
        let span = self.domain_max - self.domain_min;
        let t = if span == 0.0 {
            0.0
        } else {
            ((value - self.domain_min) / span).clamp(0.0, 1.0)
        };

        if self.stops.len() == 1 {
            return self.stops[0];
        }

        let segment_count = self.stops.len() - 1;
        let segment = (t * segment_count as f64).floor() as usize;
        let segment = segment.min(segment_count - 1);
        let local_t = t * segment_count as f64 - segment as f64;

        self.stops[segment].lerp(self.stops[segment + 1], local_t)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (*self.stops.first().unwrap_or(&Rgba::BLACK), *self.stops.last().unwrap_or(&Rgba::WHITE))
    }
}
