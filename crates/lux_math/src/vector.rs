//! Vector helpers on top of `glam::Vec3` for reflection and refraction.

use crate::Vec3;

/// Vectors shorter than this normalize to zero.
pub const NORMALIZE_EPSILON: f32 = 1e-4;

/// Normalize a vector, returning `Vec3::ZERO` for near-zero lengths.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    let len = v.length();
    if len < NORMALIZE_EPSILON {
        Vec3::ZERO
    } else {
        v / len
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n`.
///
/// `eta_ratio` is the ratio of refractive indices (incident over transmitted).
/// Returns `None` on total internal reflection.
pub fn refract(v: Vec3, n: Vec3, eta_ratio: f32) -> Option<Vec3> {
    let cos_theta = (-v).dot(n).min(1.0);
    let r_out_perp = eta_ratio * (v + cos_theta * n);
    let perp_len_sq = r_out_perp.length_squared();
    if perp_len_sq > 1.0 {
        return None;
    }
    let r_out_parallel = -(1.0 - perp_len_sq).sqrt() * n;
    Some(r_out_perp + r_out_parallel)
}

/// Schlick's approximation for reflectance.
#[inline]
pub fn schlick(cosine: f32, eta_ratio: f32) -> f32 {
    let r0 = ((1.0 - eta_ratio) / (1.0 + eta_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
