//! COR/tilt sample table and regression.
//!
//! Overview
//! - [`SampleSet`] stores `(slice, cor)` measurements, either typed in by a
//!   user, seeded with [`SampleSet::populate_slice_indices`], or filled from
//!   an automatic per-slice search.
//! - [`SampleSet::linear_regression`] fits `cor = m * slice + c`. The slope
//!   gives the axis tilt (`atan(m)`), the line gives one COR per detector row
//!   for full-volume reconstruction.
//! - [`CorTiltSnapshot`] is the serializable record written onto a stack's
//!   metadata under [`SNAPSHOT_KEY`].

mod regression;
mod sample_set;
mod snapshot;

pub use regression::{fit_line, RegressionResult};
pub use sample_set::SampleSet;
pub use snapshot::{CorTiltSnapshot, SNAPSHOT_KEY};

#[cfg(test)]
mod tests;
