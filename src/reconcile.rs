//! Enter/update/exit reconciliation between a previous key set and a new
//! dataset.
//!
//! This is the data-join half of a redraw: the caller remembers which keys
//! it last rendered, reconciles them against fresh data, and applies the
//! resulting delta to whatever display surface it owns. Nothing here
//! touches rendering.
//!
//! Keys default to record content via [`KeyAccessor::field`]. Positional
//! keying exists as an explicit opt-in degraded mode: it mis-tracks
//! identity whenever records are inserted, removed, or reordered
//! mid-sequence, so reach for it only when the sequence is append-only.

use std::collections::HashSet;

use tracing::debug;

use crate::data::Record;
use crate::error::{Error, Result};

/// Maps a record (and its position) to a stable, dataset-unique key.
pub enum KeyAccessor {
    /// Content-derived key: the value of a named field rendered as text.
    /// Text fields key as-is, numbers via `Display`, timestamps as
    /// RFC 3339.
    Field(String),
    /// Positional index key. Degraded mode: stable only while records are
    /// never inserted, removed, or reordered mid-sequence.
    Positional,
    /// Arbitrary key derivation from the record and its index.
    Custom(Box<dyn Fn(usize, &Record) -> Option<String>>),
}

impl std::fmt::Debug for KeyAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyAccessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            KeyAccessor::Positional => f.write_str("Positional"),
            KeyAccessor::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl KeyAccessor {
    /// Key records by the value of `name` rendered as text.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        KeyAccessor::Field(name.into())
    }

    /// Key records by a custom closure.
    #[must_use]
    pub fn custom(f: impl Fn(usize, &Record) -> Option<String> + 'static) -> Self {
        KeyAccessor::Custom(Box::new(f))
    }

    fn key_of(&self, index: usize, record: &Record) -> Option<String> {
        match self {
            KeyAccessor::Field(name) => record
                .text(name)
                .map(str::to_string)
                .or_else(|| record.number(name).map(|n| n.to_string()))
                .or_else(|| record.timestamp(name).map(|t| t.to_rfc3339())),
            KeyAccessor::Positional => Some(index.to_string()),
            KeyAccessor::Custom(f) => f(index, record),
        }
    }
}

/// A record paired with its reconciliation key.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyed<'a> {
    /// The stable key binding this record to a visual element.
    pub key: String,
    /// The new datum for that key.
    pub record: &'a Record,
}

/// The enter/update/exit partition produced by [`reconcile`].
///
/// Every key appears in exactly one of the three sets; `entering` plus
/// `updating` covers the new dataset exactly once each.
#[derive(Debug, Default)]
pub struct JoinDelta<'a> {
    /// Keys present in the new dataset but not previously rendered,
    /// in dataset order.
    pub entering: Vec<Keyed<'a>>,
    /// Keys present both before and now, paired with their new datum,
    /// in dataset order.
    pub updating: Vec<Keyed<'a>>,
    /// Previously rendered keys absent from the new dataset, in their
    /// previous order.
    pub exiting: Vec<String>,
}

/// Partition a new dataset against previously rendered keys.
///
/// # Errors
///
/// Returns an error if a record produces no key, or if two records in the
/// new dataset produce the same key.
pub fn reconcile<'a>(
    previous_keys: &[String],
    new_records: &'a [Record],
    key_accessor: &KeyAccessor,
) -> Result<JoinDelta<'a>> {
    let previous: HashSet<&str> = previous_keys.iter().map(String::as_str).collect();

    let mut delta = JoinDelta::default();
    let mut seen: HashSet<String> = HashSet::with_capacity(new_records.len());

    for (index, record) in new_records.iter().enumerate() {
        let key = key_accessor.key_of(index, record).ok_or(Error::MissingKey(index))?;
        if !seen.insert(key.clone()) {
            debug!(key = %key, "duplicate key in new dataset");
            return Err(Error::DuplicateKey(key));
        }
        let keyed = Keyed { key, record };
        if previous.contains(keyed.key.as_str()) {
            delta.updating.push(keyed);
        } else {
            delta.entering.push(keyed);
        }
    }

    delta.exiting =
        previous_keys.iter().filter(|k| !seen.contains(k.as_str())).cloned().collect();

    Ok(delta)
}
