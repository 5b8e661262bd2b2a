//! Ordinary least-squares fit of COR against slice index.

use crate::error::{CorTiltError, Result};
use crate::types::{Degrees, ScalarCor, Slope};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Fitted line `cor = m * slice + c`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Gradient.
    pub m: f64,
    /// Intercept: the COR at slice 0.
    pub c: f64,
}

impl RegressionResult {
    /// Build a result from a known rotation centre and axis tilt.
    pub fn from_cor_and_tilt(cor: ScalarCor, tilt: Degrees) -> Self {
        Self {
            m: tilt.to_radians().tan(),
            c: cor.value(),
        }
    }

    #[inline]
    pub fn evaluate(&self, slice: f64) -> f64 {
        self.m * slice + self.c
    }

    pub fn slope(&self) -> Slope {
        Slope(self.m)
    }

    pub fn cor(&self) -> ScalarCor {
        ScalarCor(self.c)
    }

    pub fn tilt_angle_rad(&self) -> f64 {
        self.m.atan()
    }

    pub fn tilt(&self) -> Degrees {
        Degrees::from_radians(self.tilt_angle_rad())
    }
}

/// Fit `cors` as a linear function of `slices` in the least-squares sense.
///
/// Uses the centred closed form `m = Sxy / Sxx`, `c = ȳ - m·x̄`. Fails with
/// [`CorTiltError::EmptyData`] on no samples and with
/// [`CorTiltError::DegenerateData`] when every slice index is the same.
pub fn fit_line(slices: &[usize], cors: &[f64]) -> Result<RegressionResult> {
    debug_assert_eq!(slices.len(), cors.len());
    if slices.is_empty() {
        return Err(CorTiltError::EmptyData);
    }
    let x = DVector::from_iterator(slices.len(), slices.iter().map(|&s| s as f64));
    let y = DVector::from_column_slice(cors);
    let x_mean = x.mean();
    let y_mean = y.mean();
    let dx = x.add_scalar(-x_mean);
    let dy = y.add_scalar(-y_mean);

    let sxx = dx.dot(&dx);
    if sxx <= 0.0 {
        return Err(CorTiltError::DegenerateData { slice: slices[0] });
    }
    let m = dx.dot(&dy) / sxx;
    let c = y_mean - m * x_mean;
    Ok(RegressionResult { m, c })
}
