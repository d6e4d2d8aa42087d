//! Local Phong illumination with stochastic soft shadows.

use crate::{Color, HitRecord, Light, Ray, RenderConfig, Scene};
use lux_math::{normalize, random_in_unit_disk, reflect, Interval, Vec3};
use rand::RngCore;

/// Offset applied along the normal when spawning shadow rays.
pub const SHADOW_EPSILON: f32 = 1e-3;

/// Fraction of a transparent blocker's transparency that counts as leaked light.
pub const SHADOW_LEAK: f32 = 0.7;

/// Compute the local color at a hit: ambient plus per-light diffuse and specular.
///
/// Each light's contribution is scaled by `1 - shadow_factor`; fully
/// shadowed lights are skipped.
pub fn shade(
    rec: &HitRecord,
    ray: &Ray,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let material = rec.material;
    let ambient = Color::splat(material.ambient) + scene.ambient_light * config.ambient_weight;
    let mut color = material.color * ambient;

    let view_dir = normalize(ray.origin() - rec.p);

    for light in scene.lights() {
        let shadow = shadow_factor(rec.p, rec.normal, light, scene, config.shadow_samples, rng);
        if shadow >= 1.0 {
            continue;
        }

        let light_dir = normalize(light.position - rec.p);

        let diff = rec.normal.dot(light_dir).max(0.0);
        let diffuse = material.color * (material.diffuse * diff);

        let reflect_dir = reflect(-light_dir, rec.normal);
        let spec = view_dir.dot(reflect_dir).max(0.0).powf(material.shininess);
        let specular = Color::splat(material.specular * spec);

        color += (diffuse + specular) * light.color * (light.intensity * (1.0 - shadow));
    }

    color
}

/// Fraction of `light` blocked as seen from `point`, in [0, 1].
///
/// Area lights are sampled `samples` times over a horizontal disk of the
/// light's radius; point lights always take a single sample. Transparent
/// blockers let part of the light through.
pub fn shadow_factor(
    point: Vec3,
    normal: Vec3,
    light: &Light,
    scene: &Scene,
    samples: u32,
    rng: &mut dyn RngCore,
) -> f32 {
    let samples = if light.is_area() { samples.max(1) } else { 1 };
    let origin = point + normal * SHADOW_EPSILON;

    let mut occlusion = 0.0;
    for _ in 0..samples {
        let target = if light.is_area() {
            let disk = random_in_unit_disk(rng) * light.radius;
            light.position + Vec3::new(disk.x, 0.0, disk.y)
        } else {
            light.position
        };

        let to_light = target - origin;
        let distance = to_light.length();
        if distance <= 2.0 * SHADOW_EPSILON {
            continue;
        }

        let shadow_ray = Ray::new(origin, to_light);
        let limit = Interval::new(SHADOW_EPSILON, distance - SHADOW_EPSILON);
        if let Some(blocker) = scene.hit(&shadow_ray, limit) {
            let transparency = blocker.material.transparency;
            occlusion += if transparency > 0.0 {
                1.0 - transparency * SHADOW_LEAK
            } else {
                1.0
            };
        }
    }

    Interval::UNIT.clamp(occlusion / samples as f32)
}
