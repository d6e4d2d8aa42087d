//! Finite parallelogram primitive, used for the Cornell box walls.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use lux_math::{normalize, Interval, Vec3, NORMALIZE_EPSILON};

/// A parallelogram spanned by `edge1` and `edge2` from `corner`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    corner: Vec3,
    edge1: Vec3,
    edge2: Vec3,
    material: Material,
    // Cached plane: normal . p = d
    normal: Vec3,
    d: f32,
}

impl Quad {
    /// Create a new quad. The front face is the side `edge1 x edge2` points to.
    pub fn new(corner: Vec3, edge1: Vec3, edge2: Vec3, material: Material) -> Self {
        let normal = normalize(edge1.cross(edge2));
        let d = normal.dot(corner);
        Self {
            corner,
            edge1,
            edge2,
            material,
            normal,
            d,
        }
    }

    pub fn corner(&self) -> Vec3 {
        self.corner
    }

    /// Unit plane normal, zero for a degenerate quad.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Project a point onto the quad's edge basis.
    ///
    /// Returns `(alpha, beta)`; both lie in [0, 1] for points on the quad.
    pub fn plane_coords(&self, p: Vec3) -> (f32, f32) {
        let planar = p - self.corner;
        let alpha = planar.dot(self.edge1) / self.edge1.dot(self.edge1);
        let beta = planar.dot(self.edge2) / self.edge2.dot(self.edge2);
        (alpha, beta)
    }
}

impl Hittable for Quad {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        // Parallel rays and degenerate quads (zero normal) both land here
        let denom = ray.direction().dot(self.normal);
        if denom.abs() < NORMALIZE_EPSILON {
            return None;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        let (alpha, beta) = self.plane_coords(ray.at(t));
        if !Interval::UNIT.contains(alpha) || !Interval::UNIT.contains(beta) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, &self.material))
    }
}
