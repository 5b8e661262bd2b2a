use crate::linspace::linspace;
use crate::types::ProjectionAngles;

/// `num_projections` angles evenly spaced from 0 to `max_angle_deg`
/// inclusive, in radians.
pub fn generate_projection_angles(max_angle_deg: f64, num_projections: usize) -> ProjectionAngles {
    ProjectionAngles(linspace(0.0, max_angle_deg.to_radians(), num_projections))
}
