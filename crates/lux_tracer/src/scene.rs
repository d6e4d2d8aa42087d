//! Scene container: primitives, lights and global colors.

use crate::{Color, HitRecord, Hittable, Light, Primitive, Ray};
use lux_math::Interval;

/// Primitives and lights for one render.
///
/// Built once by a scene builder and then only read while rendering.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
    /// Color returned by rays that escape the scene
    pub background_color: Color,
    /// Global ambient light added to every surface's ambient term
    pub ambient_light: Color,
}

impl Scene {
    /// Create an empty scene with the default background and ambient light.
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            lights: Vec::new(),
            background_color: Color::new(0.05, 0.05, 0.1),
            ambient_light: Color::splat(0.1),
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_ambient(mut self, color: Color) -> Self {
        self.ambient_light = color;
        self
    }

    /// Add a primitive to the scene.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene has no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Find the nearest hit strictly inside `ray_t`.
    ///
    /// Linear scan; the upper bound shrinks to the closest hit found so far.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest = None;
        let mut closest_so_far = ray_t.max;

        for primitive in &self.primitives {
            if let Some(rec) = primitive.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Sphere};
    use lux_math::Vec3;

    #[test]
    fn test_empty_scene() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);

        assert!(scene.is_empty());
        assert!(scene.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_nearest_hit_wins_regardless_of_order() {
        let red = Material::new(Color::X);
        let green = Material::new(Color::Y);

        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -20.0), 1.0, red));
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, green));
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -30.0), 1.0, red));

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let rec = scene.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 9.0).abs() < 1e-4);
        assert_eq!(rec.material.color, Color::Y);
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_hit_respects_upper_bound() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, Material::default()));

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(scene.hit(&ray, Interval::new(0.001, 8.0)).is_none());
    }

    #[test]
    fn test_builders() {
        let mut scene = Scene::new()
            .with_background(Color::ONE)
            .with_ambient(Color::ZERO);
        scene.add_light(Light::point(Vec3::Y, Color::ONE, 1.0));

        assert_eq!(scene.background_color, Color::ONE);
        assert_eq!(scene.ambient_light, Color::ZERO);
        assert_eq!(scene.lights().len(), 1);
    }
}
