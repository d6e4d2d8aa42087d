// Re-export glam for convenience
pub use glam::*;

// LUX math types
mod interval;
mod ray;
mod sampling;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{gen_f32, random_in_unit_disk, random_unit_vector};
pub use vector::{normalize, reflect, refract, schlick, NORMALIZE_EPSILON};
