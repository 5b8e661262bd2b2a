//! Value types shared by the sample table, the refinement search and the
//! reconstruction coordinator.
//!
//! Units are carried in the type where it matters: [`ScalarCor`] is a column
//! position in pixels, [`Degrees`] an angle in degrees and [`Slope`] the
//! dimensionless gradient of the COR-vs-slice line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Single centre-of-rotation value in pixel units.
///
/// Callers are responsible for range checks against the image width.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScalarCor(pub f64);

impl ScalarCor {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for ScalarCor {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ScalarCor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Angle in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn from_radians(rad: f64) -> Self {
        Self(rad.to_degrees())
    }

    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°", self.0)
    }
}

/// Gradient of the fitted `cor = m * slice + c` line.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slope(pub f64);

impl Slope {
    pub fn value(self) -> f64 {
        self.0
    }

    /// Tilt of the rotation axis implied by this gradient.
    pub fn tilt(self) -> Degrees {
        Degrees::from_radians(self.0.atan())
    }
}

/// Projection angles in radians, one per projection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectionAngles(pub Vec<f64>);

impl ProjectionAngles {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// One measurement of the sample table: a slice (row) index and the COR
/// found for it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlicePoint {
    pub slice: usize,
    pub cor: f64,
}

impl SlicePoint {
    pub fn new(slice: usize, cor: f64) -> Self {
        Self { slice, cor }
    }
}

impl From<(usize, f64)> for SlicePoint {
    fn from((slice, cor): (usize, f64)) -> Self {
        Self { slice, cor }
    }
}

/// Parameters forwarded opaquely to a reconstruction backend.
///
/// `algorithm` selects the backend through the
/// [`BackendRegistry`](crate::recon::BackendRegistry); the remaining fields are
/// interpreted by the backend itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionParameters {
    /// Backend identifier, e.g. `"FBP_CUDA"` or `"gridrec"`.
    pub algorithm: String,
    /// Filter identifier understood by the backend, e.g. `"ram-lak"`.
    pub filter_name: String,
    /// Iteration count for iterative solvers. Ignored by analytic methods.
    pub num_iter: usize,
    /// Rotation centre used when no per-row table is supplied.
    pub cor: ScalarCor,
    /// Axis tilt used together with `cor`.
    pub tilt: Degrees,
    /// Angular range covered by the projections, in degrees.
    pub max_projection_angle: f64,
    /// Optional beam hardening polynomial coefficients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beam_hardening_coefs: Option<Vec<f64>>,
}

impl Default for ReconstructionParameters {
    fn default() -> Self {
        Self {
            algorithm: "FBP_CUDA".to_string(),
            filter_name: "ram-lak".to_string(),
            num_iter: 1,
            cor: ScalarCor(0.0),
            tilt: Degrees(0.0),
            max_projection_angle: 360.0,
            beam_hardening_coefs: None,
        }
    }
}

impl ReconstructionParameters {
    pub fn new(algorithm: impl Into<String>, filter_name: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            filter_name: filter_name.into(),
            ..Default::default()
        }
    }
}
