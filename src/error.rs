//! Error types for chartflow operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in chartflow operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Scale configuration error (e.g. empty color stops).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Ordinal scale domain and range lengths differ.
    #[error("Domain/range length mismatch: domain has {domain_len} values, range has {range_len}")]
    DomainRangeMismatch {
        /// Number of domain values.
        domain_len: usize,
        /// Number of range values.
        range_len: usize,
    },

    /// Two records in the same dataset produced the same reconciliation key.
    #[error("Duplicate reconciliation key: {0:?}")]
    DuplicateKey(String),

    /// A record produced no reconciliation key (missing key field).
    #[error("Record at index {0} has no value for the key field")]
    MissingKey(usize),
}
