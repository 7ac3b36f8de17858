//! Binning engine: partition a continuous domain into half-open intervals
//! and bucket records by accessor value.
//!
//! Bins are contiguous, non-overlapping, and collectively cover the domain.
//! Every interval is half-open `[x0, x1)` except the last, whose upper
//! bound is inclusive so the domain maximum lands in the final bin: a value
//! equal to the domain minimum falls in the first bin, a value equal to the
//! maximum in the last.

use tracing::debug;

use crate::data::Record;

/// A half-open interval bucket with its assigned records.
#[derive(Debug, Clone)]
pub struct Bin<'a> {
    /// Lower bound (inclusive).
    pub x0: f64,
    /// Upper bound (exclusive, except for the final bin).
    pub x1: f64,
    /// Records whose accessor value falls in this interval.
    pub records: Vec<&'a Record>,
}

impl Bin<'_> {
    /// Number of records assigned to this bin.
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Strategy for choosing the number of bins from the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BinStrategy {
    /// Sturges' rule: `ceil(log2(n) + 1)`.
    #[default]
    Sturges,
    /// Scott's rule: bin width `3.5 * std / n^(1/3)`.
    Scott,
    /// Freedman-Diaconis rule: bin width `2 * IQR / n^(1/3)`.
    FreedmanDiaconis,
    /// Fixed number of bins.
    Fixed(usize),
}

impl BinStrategy {
    /// Number of bins for the given values. Always at least 1.
    #[must_use]
    pub fn bin_count(self, values: &[f64]) -> usize {
        let n = values.len();
        if n == 0 {
            return 1;
        }

        match self {
            BinStrategy::Sturges => sturges(n),
            BinStrategy::Scott => {
                let width = 3.5 * std_dev(values) / (n as f64).powf(1.0 / 3.0);
                count_from_width(values, width, n)
            }
            BinStrategy::FreedmanDiaconis => {
                let width = 2.0 * iqr(values) / (n as f64).powf(1.0 / 3.0);
                count_from_width(values, width, n)
            }
            BinStrategy::Fixed(bins) => bins.max(1),
        }
        .max(1)
    }
}

fn sturges(n: usize) -> usize {
    ((n as f64).log2().ceil() + 1.0) as usize
}

fn count_from_width(values: &[f64], width: f64, n: usize) -> usize {
    let range = value_range(values);
    if width > 0.0 && range > 0.0 {
        (range / width).ceil() as usize
    } else {
        sturges(n)
    }
}

fn value_range(values: &[f64]) -> f64 {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    max - min
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

fn iqr(values: &[f64]) -> f64 {
    if values.len() < 4 {
        return value_range(values);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let q1 = sorted[sorted.len() / 4];
    let q3 = sorted[3 * sorted.len() / 4];
    q3 - q1
}

/// Partition `domain` into `threshold_count` uniform intervals and bucket
/// records by accessor value.
///
/// Interval edges are uniformly spaced over the domain. Records with
/// missing accessor values, and values outside the domain, are excluded.
/// Output is ordered by ascending `x0`. An empty dataset, a collapsed or
/// inverted domain, or a zero threshold count yields no bins.
pub fn bin<'a, F>(
    records: &'a [Record],
    accessor: F,
    domain: (f64, f64),
    threshold_count: usize,
) -> Vec<Bin<'a>>
where
    F: Fn(&Record) -> Option<f64>,
{
    let (lo, hi) = domain;
    let spannable = lo.is_finite() && hi.is_finite() && lo < hi;
    if records.is_empty() || threshold_count == 0 || !spannable {
        debug!(threshold_count, ?domain, "degenerate bin request, producing no bins");
        return Vec::new();
    }

    let n = threshold_count;
    // Uniform edges; the outermost edges are pinned to the exact domain
    // bounds so coverage holds bit-for-bit.
    let edges: Vec<f64> = (0..=n)
        .map(|i| if i == n { hi } else { lo + (hi - lo) * (i as f64 / n as f64) })
        .collect();

    let mut bins: Vec<Bin<'a>> = (0..n)
        .map(|i| Bin { x0: edges[i], x1: edges[i + 1], records: Vec::new() })
        .collect();

    for record in records {
        let Some(value) = accessor(record) else { continue };
        if value < lo || value > hi {
            continue;
        }
        // Last edge <= value; the domain maximum folds into the final bin.
        let idx = edges.partition_point(|e| *e <= value).saturating_sub(1);
        let idx = idx.min(n - 1);
        bins[idx].records.push(record);
    }

    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{numeric_field, Dataset};

    #[test]
    fn test_bin_two_thresholds() {
        // values [1, 5, 9], domain [1, 9], 2 thresholds:
        // [1, 5) holds {1}, [5, 9] holds {5, 9}
        let dataset = Dataset::from_values("v", &[1.0, 5.0, 9.0]);
        let bins = bin(&dataset, numeric_field("v"), (1.0, 9.0), 2);
        assert_eq!(bins.len(), 2);
        assert_eq!((bins[0].x0, bins[0].x1), (1.0, 5.0));
        assert_eq!((bins[1].x0, bins[1].x1), (5.0, 9.0));
        assert_eq!(bins[0].count(), 1);
        assert_eq!(bins[1].count(), 2);
        assert_eq!(bins[0].records[0].number("v"), Some(1.0));
    }

    #[test]
    fn test_bin_boundaries_half_open() {
        let dataset = Dataset::from_values("v", &[0.0, 2.5, 5.0, 7.5, 10.0]);
        let bins = bin(&dataset, numeric_field("v"), (0.0, 10.0), 4);
        // A value on an interior edge belongs to the bin it opens
        assert_eq!(bins[0].count(), 1); // 0.0
        assert_eq!(bins[1].count(), 1); // 2.5
        assert_eq!(bins[2].count(), 1); // 5.0
        assert_eq!(bins[3].count(), 2); // 7.5 and the inclusive max 10.0
    }

    #[test]
    fn test_bin_no_loss_no_duplication() {
        let values: Vec<f64> = (0..97).map(|i| f64::from(i) * 0.37).collect();
        let dataset = Dataset::from_values("v", &values);
        let domain = crate::data::extent(&dataset, numeric_field("v")).unwrap();
        let bins = bin(&dataset, numeric_field("v"), domain, 13);
        let total: usize = bins.iter().map(Bin::count).sum();
        assert_eq!(total, dataset.len());
    }

    #[test]
    fn test_bin_contiguous_cover() {
        let dataset = Dataset::from_values("v", &[1.0, 2.0, 3.0]);
        let bins = bin(&dataset, numeric_field("v"), (0.0, 12.0), 6);
        assert_eq!(bins[0].x0, 0.0);
        assert_eq!(bins[bins.len() - 1].x1, 12.0);
        for pair in bins.windows(2) {
            assert_eq!(pair[0].x1, pair[1].x0);
        }
    }

    #[test]
    fn test_bin_excludes_outside_domain_and_missing() {
        let mut dataset = Dataset::from_values("v", &[-1.0, 0.5, 2.0]);
        dataset.push(crate::data::Record::new().with("v", "n/a"));
        let bins = bin(&dataset, numeric_field("v"), (0.0, 1.0), 2);
        let total: usize = bins.iter().map(Bin::count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_bin_empty_dataset_yields_none() {
        assert!(bin(&Dataset::new(), numeric_field("v"), (0.0, 1.0), 3).is_empty());
    }

    #[test]
    fn test_bin_collapsed_domain_yields_none() {
        let dataset = Dataset::from_values("v", &[1.0]);
        assert!(bin(&dataset, numeric_field("v"), (1.0, 1.0), 4).is_empty());
    }

    #[test]
    fn test_bin_zero_thresholds_yields_none() {
        let dataset = Dataset::from_values("v", &[1.0]);
        assert!(bin(&dataset, numeric_field("v"), (0.0, 1.0), 0).is_empty());
    }

    #[test]
    fn test_bin_inverted_domain_yields_none() {
        let dataset = Dataset::from_values("v", &[1.0]);
        assert!(bin(&dataset, numeric_field("v"), (5.0, 1.0), 4).is_empty());
    }

    #[test]
    fn test_bin_strategy_sturges() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let count = BinStrategy::Sturges.bin_count(&values);
        assert!((7..=9).contains(&count));
    }

    #[test]
    fn test_bin_strategy_scott() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        assert!(BinStrategy::Scott.bin_count(&values) >= 1);
    }

    #[test]
    fn test_bin_strategy_freedman_diaconis_zero_iqr_falls_back() {
        let values = vec![5.0; 100];
        // Zero IQR falls back to Sturges
        assert_eq!(
            BinStrategy::FreedmanDiaconis.bin_count(&values),
            BinStrategy::Sturges.bin_count(&values)
        );
    }

    #[test]
    fn test_bin_strategy_fixed_floor() {
        assert_eq!(BinStrategy::Fixed(0).bin_count(&[1.0, 2.0]), 1);
        assert_eq!(BinStrategy::Fixed(12).bin_count(&[1.0, 2.0]), 12);
    }

    #[test]
    fn test_bin_strategy_empty_values() {
        assert_eq!(BinStrategy::Sturges.bin_count(&[]), 1);
        assert_eq!(BinStrategy::Scott.bin_count(&[]), 1);
    }

    #[test]
    fn test_bin_strategy_default() {
        assert_eq!(BinStrategy::default(), BinStrategy::Sturges);
    }
}
