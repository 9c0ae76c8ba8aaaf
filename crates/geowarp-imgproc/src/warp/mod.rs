mod control_points;
mod polynomial;
mod rotation_scale;

pub use control_points::ControlPoints;
pub use polynomial::{generate_control_point_map, num_polynomial_terms};
pub use rotation_scale::{generate_rotation_scale_map, rotation_scale_matrix};
