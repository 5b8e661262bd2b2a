#![doc = include_str!("../README.md")]

// Core workflow
pub mod coordinator;
pub mod samples;
pub mod inspection;
pub mod recon;

// Supporting types and collaborators
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod linspace;
pub mod types;

// Tool helpers
pub mod config;
pub mod io;

// --- High-level re-exports -------------------------------------------------

pub use crate::coordinator::ReconstructionCoordinator;
pub use crate::samples::{CorTiltSnapshot, RegressionResult, SampleSet};
pub use crate::error::{BackendError, CorTiltError, Result};
pub use crate::inspection::{CandidateKind, RefinementSearch, RefinementState};
pub use crate::recon::{Backend, BackendRegistry, Progress};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use cor_tilt::prelude::*;
///
/// let mut samples = SampleSet::new();
/// samples.add_point(None, SlicePoint::new(10, 5.0));
/// samples.add_point(None, SlicePoint::new(40, 8.0));
/// let fit = samples.linear_regression().unwrap();
/// assert!((fit.m - 0.1).abs() < 1e-12);
/// ```
pub mod prelude {
    pub use crate::image::{ImageStack, ProjectionStack};
    pub use crate::types::{Degrees, ReconstructionParameters, ScalarCor, SlicePoint};
    pub use crate::{Backend, BackendRegistry, Progress, ReconstructionCoordinator, SampleSet};
}
