//! Record-oriented data model and field accessors.
//!
//! A [`Record`] is an opaque field-name to [`Scalar`] mapping; a [`Dataset`]
//! is an ordered sequence of records. No schema is enforced: fields are
//! pulled out by accessor functions, and a missing or mistyped field is
//! treated as absent data rather than coerced.

use std::collections::HashMap;
use std::ops::Deref;

use chrono::{DateTime, Utc};

/// A scalar field value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scalar {
    /// A numeric value.
    Number(f64),
    /// A point in time.
    Timestamp(DateTime<Utc>),
    /// A text or category value.
    Text(String),
    /// A missing value.
    Null,
}

impl Scalar {
    /// Get as f64, or None if not a finite number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Get as timestamp, or None if not a timestamp.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Scalar::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Get as string slice, or None if not text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Number(v)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(t: DateTime<Utc>) -> Self {
        Scalar::Timestamp(t)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

/// A single data point: an unordered field-name to value mapping.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    fields: HashMap<String, Scalar>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, consuming and returning the record for chaining.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Scalar>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field.
    pub fn set(&mut self, name: &str, value: impl Into<Scalar>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// Get a field value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.fields.get(name)
    }

    /// Get a field as a finite number.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Scalar::as_f64)
    }

    /// Get a field as a timestamp.
    #[must_use]
    pub fn timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        self.get(name).and_then(Scalar::as_timestamp)
    }

    /// Get a field as text.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Scalar::as_str)
    }
}

/// An ordered sequence of records.
///
/// Order is preserved but carries no meaning unless a chart sorts
/// explicitly (e.g. by a date accessor before drawing a line).
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a vector of records.
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Create single-field records from a numeric array.
    #[must_use]
    pub fn from_values(field: &str, values: &[f64]) -> Self {
        let records = values.iter().map(|&v| Record::new().with(field, v)).collect();
        Self { records }
    }

    /// Create two-field records from parallel x and y arrays.
    ///
    /// Arrays of unequal length are truncated to the shorter one.
    #[must_use]
    pub fn from_xy(x: &[f64], y: &[f64]) -> Self {
        let n = x.len().min(y.len());
        let records = (0..n)
            .map(|i| Record::new().with("x", x[i]).with("y", y[i]))
            .collect();
        Self { records }
    }

    /// Append a record.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Get the records as a slice.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl Deref for Dataset {
    type Target = [Record];

    fn deref(&self) -> &[Record] {
        &self.records
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self { records: iter.into_iter().collect() }
    }
}

/// Numeric accessor for a named field.
///
/// Returns a pure extraction closure suitable for scale and bin builders.
pub fn numeric_field(name: impl Into<String>) -> impl Fn(&Record) -> Option<f64> + Clone {
    let name = name.into();
    move |record: &Record| record.number(&name)
}

/// Timestamp accessor for a named field.
pub fn timestamp_field(
    name: impl Into<String>,
) -> impl Fn(&Record) -> Option<DateTime<Utc>> + Clone {
    let name = name.into();
    move |record: &Record| record.timestamp(&name)
}

/// Text accessor for a named field.
pub fn text_field(name: impl Into<String>) -> impl Fn(&Record) -> Option<String> + Clone {
    let name = name.into();
    move |record: &Record| record.text(&name).map(str::to_string)
}

/// Minimum and maximum accessor values over a dataset.
///
/// Missing and non-finite values are skipped; returns None when no
/// numeric values remain.
pub fn extent<F>(records: &[Record], accessor: F) -> Option<(f64, f64)>
where
    F: Fn(&Record) -> Option<f64>,
{
    let mut bounds: Option<(f64, f64)> = None;
    for value in records.iter().filter_map(&accessor) {
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }
    bounds
}

/// Minimum and maximum timestamps over a dataset.
pub fn time_extent<F>(records: &[Record], accessor: F) -> Option<(DateTime<Utc>, DateTime<Utc>)>
where
    F: Fn(&Record) -> Option<DateTime<Utc>>,
{
    let mut bounds: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
    for value in records.iter().filter_map(&accessor) {
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }
    bounds
}

/// Arithmetic mean of accessor values, skipping missing data.
pub fn mean<F>(records: &[Record], accessor: F) -> Option<f64>
where
    F: Fn(&Record) -> Option<f64>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in records.iter().filter_map(&accessor) {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
