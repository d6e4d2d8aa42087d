//! Recursive Whitted-style integrator.
//!
//! Each hit is shaded locally, then blended with one mirror reflection and,
//! for transparent materials, a Fresnel-weighted mix of reflection and
//! refraction. Reflectivity is applied first and transparency second:
//!
//! ```text
//! c1 = lerp(local, reflected, reflectivity)
//! c2 = lerp(c1, fresnel_mix, transparency)
//! ```
//!
//! The reflected ray is traced at most once per hit and shared by both steps.

use crate::shading::shade;
use crate::{Color, HitRecord, RenderConfig, Scene};
use lux_math::{reflect, refract, schlick, Interval, Ray};
use rand::RngCore;

/// Offset applied along the normal when spawning secondary rays.
pub const RAY_EPSILON: f32 = 1e-3;

/// Hard cap on recursion depth.
pub const MAX_DEPTH: u32 = 10;

/// Traces rays through a borrowed scene.
pub struct Tracer<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig) -> Self {
        Self { scene, config }
    }

    /// Compute the color seen along `ray` with `depth` bounces left.
    ///
    /// Returns black once depth is exhausted and the background color for
    /// rays that leave the scene.
    pub fn trace(&self, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        // If we've exceeded max depth, return black (no light)
        if depth == 0 {
            return Color::ZERO;
        }
        let depth = depth.min(MAX_DEPTH);

        let rec = match self.scene.hit(ray, Interval::new(RAY_EPSILON, f32::INFINITY)) {
            Some(rec) => rec,
            None => return self.scene.background_color,
        };

        let material = rec.material;
        let mut color = shade(&rec, ray, self.scene, self.config, rng);

        if !material.is_specular() {
            return color;
        }

        let reflected = self.trace_reflection(ray, &rec, depth, rng);

        if material.reflectivity > 0.0 {
            color = color.lerp(reflected, material.reflectivity);
        }

        if material.transparency > 0.0 {
            let transmitted = self.trace_transmission(ray, &rec, reflected, depth, rng);
            color = color.lerp(transmitted, material.transparency);
        }

        color
    }

    fn trace_reflection(
        &self,
        ray: &Ray,
        rec: &HitRecord,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let direction = reflect(ray.direction(), rec.normal);
        let reflect_ray = Ray::new(rec.p + rec.normal * RAY_EPSILON, direction);
        self.trace(&reflect_ray, depth - 1, rng)
    }

    /// Fresnel mix of the already traced reflection and a refracted ray.
    ///
    /// Total internal reflection returns the reflection unchanged.
    fn trace_transmission(
        &self,
        ray: &Ray,
        rec: &HitRecord,
        reflected: Color,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let ior = rec.material.refractive_index;
        let eta_ratio = if rec.front_face { 1.0 / ior } else { ior };

        let cos_theta = (-ray.direction().dot(rec.normal)).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        if eta_ratio * sin_theta > 1.0 {
            return reflected;
        }

        let Some(direction) = refract(ray.direction(), rec.normal, eta_ratio) else {
            return reflected;
        };

        let fresnel = schlick(cos_theta, eta_ratio);
        let refract_ray = Ray::new(rec.p - rec.normal * RAY_EPSILON, direction);
        let refracted = self.trace(&refract_ray, depth - 1, rng);

        reflected * fresnel + refracted * (1.0 - fresnel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cuboid, Light, Material, Quad, Sphere};
    use lux_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lit_scene(material: Material) -> Scene {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 2.0, material));
        scene.add_light(Light::point(Vec3::new(0.0, 10.0, 0.0), Color::ONE, 1.0));
        scene
    }

    #[test]
    fn test_depth_zero_is_black() {
        let scene = lit_scene(Material::default()).with_background(Color::ONE);
        let config = RenderConfig::default();
        let tracer = Tracer::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert_eq!(tracer.trace(&ray, 0, &mut rng), Color::ZERO);

        let miss = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(tracer.trace(&miss, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = lit_scene(Material::default()).with_background(Color::new(0.2, 0.3, 0.4));
        let config = RenderConfig::default();
        let tracer = Tracer::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(tracer.trace(&ray, 5, &mut rng), Color::new(0.2, 0.3, 0.4));
    }

    #[test]
    fn test_diffuse_material_equals_local_shading() {
        let scene = lit_scene(Material::new(Color::new(0.8, 0.2, 0.2)));
        let config = RenderConfig::default();
        let tracer = Tracer::new(&scene, &config);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.5, -10.0));

        let mut rng = StdRng::seed_from_u64(11);
        let traced = tracer.trace(&ray, 5, &mut rng);

        let mut rng = StdRng::seed_from_u64(11);
        let rec = scene.hit(&ray, Interval::new(RAY_EPSILON, f32::INFINITY)).unwrap();
        let local = shade(&rec, &ray, &scene, &config, &mut rng);

        assert_eq!(traced, local);
    }

    #[test]
    fn test_perfect_mirror_shows_reflected_wall() {
        let mirror = Material::new(Color::ONE)
            .with_phong(0.0, 0.0, 0.0, 1.0)
            .with_reflectivity(1.0);
        let green = Material::new(Color::new(0.0, 1.0, 0.0)).with_phong(1.0, 0.0, 0.0, 1.0);

        // Mirror facing the camera, green wall behind the camera
        let mut scene = Scene::new().with_ambient(Color::ZERO);
        scene.add(Quad::new(
            Vec3::new(-5.0, -5.0, -10.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
            mirror,
        ));
        scene.add(Quad::new(
            Vec3::new(-50.0, -50.0, 10.0),
            Vec3::new(0.0, 100.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
            green,
        ));

        let config = RenderConfig::default();
        let tracer = Tracer::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(0);

        let color = tracer.trace(&Ray::new(Vec3::ZERO, -Vec3::Z), 3, &mut rng);
        assert!((color - Color::new(0.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_mirror_depth_limit() {
        let mirror = Material::new(Color::ONE)
            .with_phong(0.0, 0.0, 0.0, 1.0)
            .with_reflectivity(1.0);
        let mut scene = Scene::new()
            .with_background(Color::ONE)
            .with_ambient(Color::ZERO);
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 2.0, mirror));

        let config = RenderConfig::default();
        let tracer = Tracer::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);

        // One bounce left: the reflection ray has depth 0 and comes back black
        assert_eq!(tracer.trace(&ray, 1, &mut rng), Color::ZERO);
        // Two bounces: the reflection escapes to the background
        assert_eq!(tracer.trace(&ray, 2, &mut rng), Color::ONE);
    }

    #[test]
    fn test_clear_glass_passes_background_through() {
        let glass = Material::new(Color::ONE)
            .with_phong(0.0, 0.0, 0.0, 1.0)
            .with_transparency(1.0, 1.0);
        let mut scene = Scene::new()
            .with_background(Color::new(0.1, 0.6, 0.9))
            .with_ambient(Color::ZERO);
        scene.add(Cuboid::new(Vec3::new(-1.0, -1.0, -12.0), Vec3::new(1.0, 1.0, -8.0), glass));

        let config = RenderConfig::default();
        let tracer = Tracer::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(0);

        // IOR 1 with normal incidence: no Fresnel reflection, rays go straight through
        let color = tracer.trace(&Ray::new(Vec3::ZERO, -Vec3::Z), 5, &mut rng);
        assert!((color - Color::new(0.1, 0.6, 0.9)).length() < 1e-5);
    }

    #[test]
    fn test_total_internal_reflection_uses_reflection_only() {
        let glass = Material::new(Color::ONE)
            .with_phong(0.0, 0.0, 0.0, 1.0)
            .with_transparency(1.0, 1.5);
        let mut scene = Scene::new()
            .with_background(Color::new(0.3, 0.3, 0.3))
            .with_ambient(Color::ZERO);
        scene.add(Sphere::new(Vec3::ZERO, 5.0, glass));

        let config = RenderConfig::default();
        let tracer = Tracer::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(0);

        // Grazing ray from inside the glass sphere is totally reflected, so
        // none of the background leaks in through a refracted ray
        let ray = Ray::new(Vec3::new(0.0, 4.9, 0.0), Vec3::new(1.0, 0.05, 0.0));
        let color = tracer.trace(&ray, 2, &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_mirror_glass_blends_reflection_then_transmission() {
        let flat = |color| Material::new(color).with_phong(1.0, 0.0, 0.0, 1.0);
        let mirror_glass = Material::new(Color::ONE)
            .with_phong(0.0, 0.0, 0.0, 1.0)
            .with_reflectivity(0.4)
            .with_transparency(0.5, 1.5);

        let mut scene = Scene::new().with_ambient(Color::ZERO);
        // Mirror-glass sheet in front of the camera
        scene.add(Quad::new(
            Vec3::new(-5.0, -5.0, -10.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
            mirror_glass,
        ));
        // Green wall behind the camera, red wall behind the sheet
        scene.add(Quad::new(
            Vec3::new(-50.0, -50.0, 10.0),
            Vec3::new(0.0, 100.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
            flat(Color::new(0.0, 1.0, 0.0)),
        ));
        scene.add(Quad::new(
            Vec3::new(-50.0, -50.0, -20.0),
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::new(0.0, 100.0, 0.0),
            flat(Color::new(1.0, 0.0, 0.0)),
        ));

        let config = RenderConfig::default();
        let tracer = Tracer::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(0);
        let color = tracer.trace(&Ray::new(Vec3::ZERO, -Vec3::Z), 3, &mut rng);

        // Normal incidence at IOR 1.5: R = 0.04
        let reflected = Color::new(0.0, 1.0, 0.0);
        let refracted = Color::new(1.0, 0.0, 0.0);
        let c1 = reflected * 0.4;
        let fresnel_mix = reflected * 0.04 + refracted * 0.96;
        let expected = c1.lerp(fresnel_mix, 0.5);

        assert!((expected - Color::new(0.48, 0.22, 0.0)).length() < 1e-5);
        assert!((color - expected).length() < 1e-4, "color = {:?}", color);
    }

    #[test]
    fn test_output_is_finite() {
        let glass = Material::new(Color::new(0.9, 0.9, 1.0))
            .with_reflectivity(0.4)
            .with_transparency(0.5, 1.5);
        let scene = lit_scene(glass);
        let config = RenderConfig::default();
        let tracer = Tracer::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(5);

        for i in 0..50 {
            let x = (i as f32 - 25.0) * 0.01;
            let ray = Ray::new(Vec3::ZERO, Vec3::new(x, x * 0.5, -1.0));
            let color = tracer.trace(&ray, 6, &mut rng);
            assert!(color.is_finite(), "non-finite color {:?}", color);
        }
    }
}
