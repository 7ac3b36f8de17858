//! # Chartflow
//!
//! Renderer-agnostic chart construction pipeline: turns a raw tabular
//! dataset into the geometric primitives a chart needs (scale mappings,
//! bin partitions, bounded layout dimensions, and enter/update/exit
//! reconciliation deltas) and stops there. Rendering is the caller's job.
//!
//! Every stage is a pure function of its inputs and is recomputed from
//! scratch on each data refresh; only reconciliation consumes prior
//! output (the previously rendered key set), and the caller supplies it
//! explicitly.
//!
//! ## Pipeline
//!
//! Layout → scales → binning (optional) → reconciliation:
//!
//! ```rust
//! use chartflow::prelude::*;
//!
//! let dims = Dimensions::new(600.0, 540.0, Margin::new(30.0, 10.0, 50.0, 50.0));
//! let dataset = Dataset::from_values("humidity", &[0.31, 0.58, 0.47, 0.92, 0.66]);
//!
//! let x_scale = LinearScale::from_data(
//!     &dataset,
//!     numeric_field("humidity"),
//!     (0.0, dims.bounded_width()),
//! )
//! .nice(10);
//!
//! let bars = bin(&dataset, numeric_field("humidity"), x_scale.domain(), 12);
//! assert_eq!(bars.iter().map(Bin::count).sum::<usize>(), dataset.len());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: serialization support for the data model and layout types

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

// ============================================================================
// Core Modules
// ============================================================================

/// Binning engine for histogram construction.
pub mod bins;

/// Color type for color scale ranges.
pub mod color;

/// Record-oriented data model and field accessors.
pub mod data;

/// Geometric primitives (points, rectangles, polar placement).
pub mod geometry;

/// Layout calculator (outer size, margins, bounded area).
pub mod layout;

/// Enter/update/exit reconciliation between refreshes.
pub mod reconcile;

/// Scale functions for data-to-visual mappings.
pub mod scale;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for chartflow operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use chartflow::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bins::{bin, Bin, BinStrategy};
    pub use crate::color::Rgba;
    pub use crate::data::{
        extent, mean, numeric_field, text_field, time_extent, timestamp_field, Dataset, Record,
        Scalar,
    };
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Point, Rect};
    pub use crate::layout::{Dimensions, Margin};
    pub use crate::reconcile::{reconcile, JoinDelta, KeyAccessor, Keyed};
    pub use crate::scale::{
        ticks, ColorScale, LinearScale, OrdinalScale, Scale, SqrtScale, TimeScale,
    };
}
