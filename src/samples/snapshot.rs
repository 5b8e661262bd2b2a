use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata key under which a fit snapshot is stored on an image stack.
pub const SNAPSHOT_KEY: &str = "auto_cor_tilt";

/// Record of a COR/tilt fit and the samples it was computed from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorTiltSnapshot {
    pub fitted_gradient: f64,
    pub rotation_centre: f64,
    pub slice_indices: Vec<usize>,
    pub rotation_centres: Vec<f64>,
    pub tilt_angle_rad: f64,
}

impl CorTiltSnapshot {
    pub fn to_value(&self) -> Value {
        // Plain struct of numbers and vectors; serialization cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
