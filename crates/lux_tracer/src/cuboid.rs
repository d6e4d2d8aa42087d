//! Axis-aligned box primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use lux_math::{Interval, Vec3};

/// An axis-aligned box between two corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    min: Vec3,
    max: Vec3,
    material: Material,
}

impl Cuboid {
    /// Create a box from two opposite corners, in any order.
    pub fn new(a: Vec3, b: Vec3, material: Material) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            material,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Cuboid {
    /// Slab intersection.
    ///
    /// The entry face is reported when it lies inside `ray_t`, otherwise the
    /// exit face (rays starting inside the box, or skipping the entry).
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let origin = ray.origin();
        let direction = ray.direction();

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        let mut near_normal = Vec3::ZERO;
        let mut far_normal = Vec3::ZERO;

        for axis in 0..3 {
            // Parallel to this slab: the ray must start strictly between its faces
            if direction[axis] == 0.0 {
                if origin[axis] <= self.min[axis] || origin[axis] >= self.max[axis] {
                    return None;
                }
                continue;
            }

            let adinv = 1.0 / direction[axis];
            let mut t0 = (self.min[axis] - origin[axis]) * adinv;
            let mut t1 = (self.max[axis] - origin[axis]) * adinv;

            let mut sign = 1.0;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
                sign = -1.0;
            }

            if t0 > t_near {
                t_near = t0;
                near_normal = Vec3::ZERO;
                near_normal[axis] = -sign;
            }
            if t1 < t_far {
                t_far = t1;
                far_normal = Vec3::ZERO;
                far_normal[axis] = sign;
            }

            if t_far < t_near {
                return None;
            }
        }

        let (t, outward_normal) = if ray_t.surrounds(t_near) {
            (t_near, near_normal)
        } else if ray_t.surrounds(t_far) {
            (t_far, far_normal)
        } else {
            return None;
        };

        Some(HitRecord::new(ray, t, outward_normal, &self.material))
    }
}
