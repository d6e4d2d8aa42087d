//! LUX tracer - CPU Whitted ray tracing
//!
//! A recursive ray tracer for Cornell box scenes: Phong shading, soft
//! shadows from area lights, mirror reflection and Fresnel refraction.
//!
//! Rendering is progressive: the image is produced in row batches and the
//! caller gets control back after each one.

mod batch;
mod camera;
mod cuboid;
mod hittable;
mod light;
mod material;
mod primitive;
mod quad;
mod renderer;
mod scene;
mod shading;
mod sphere;
mod tracer;

pub use batch::{generate_batches, render_batch, RowBatch, DEFAULT_ROWS_PER_BATCH};
pub use camera::Camera;
pub use cuboid::Cuboid;
pub use hittable::{HitRecord, Hittable};
pub use light::Light;
pub use material::{Color, Material};
pub use primitive::Primitive;
pub use quad::Quad;
pub use renderer::{
    batch_rng, color_to_rgba, linear_to_gamma, render_pixel, ProgressiveRenderer, RenderConfig,
    RenderError,
};
pub use scene::Scene;
pub use shading::{shade, shadow_factor, SHADOW_EPSILON, SHADOW_LEAK};
pub use sphere::Sphere;
pub use tracer::{Tracer, MAX_DEPTH, RAY_EPSILON};

/// Re-export Vec3 and common math types from lux_math
pub use lux_math::{Interval, Ray, Vec3};
