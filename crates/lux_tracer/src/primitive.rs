//! Tagged union over the analytic primitives.

use crate::{Cuboid, HitRecord, Hittable, Quad, Ray, Sphere};
use lux_math::Interval;

/// Any primitive a scene can hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Cuboid(Cuboid),
    Quad(Quad),
}

impl Hittable for Primitive {
    #[inline]
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match self {
            Primitive::Sphere(s) => s.hit(ray, ray_t),
            Primitive::Cuboid(b) => b.hit(ray, ray_t),
            Primitive::Quad(q) => q.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(s: Sphere) -> Self {
        Primitive::Sphere(s)
    }
}

impl From<Cuboid> for Primitive {
    fn from(b: Cuboid) -> Self {
        Primitive::Cuboid(b)
    }
}

impl From<Quad> for Primitive {
    fn from(q: Quad) -> Self {
        Primitive::Quad(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Vec3};
    use lux_math::Interval;

    #[test]
    fn test_each_variant_dispatches_hit() {
        let material = Material::new(Vec3::ONE);
        let primitives: Vec<Primitive> = vec![
            Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, material).into(),
            Cuboid::new(Vec3::new(-1.0, -1.0, -11.0), Vec3::new(1.0, 1.0, -9.0), material).into(),
            Quad::new(
                Vec3::new(-1.0, -1.0, -9.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(0.0, 2.0, 0.0),
                material,
            )
            .into(),
        ];

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        for primitive in &primitives {
            let rec = primitive.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
            assert!((rec.t - 9.0).abs() < 1e-4);
            assert!((rec.normal - Vec3::Z).length() < 1e-5);
        }

        let away = Ray::new(Vec3::ZERO, Vec3::Z);
        for primitive in &primitives {
            assert!(primitive.hit(&away, Interval::new(0.001, f32::INFINITY)).is_none());
        }
    }
}
