//! Surface material for Phong shading, mirrors and glass.

use lux_math::{Interval, Vec3, NORMALIZE_EPSILON};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Flat material description shared by every primitive.
///
/// A single struct covers diffuse walls, mirrors and glass; the tracer looks
/// at `reflectivity` and `transparency` to decide which secondary rays to
/// spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base surface color (components 0-1)
    pub color: Color,
    /// Ambient coefficient
    pub ambient: f32,
    /// Diffuse coefficient
    pub diffuse: f32,
    /// Specular coefficient
    pub specular: f32,
    /// Phong exponent for the specular highlight
    pub shininess: f32,
    /// 0 = no mirror reflection, 1 = perfect mirror
    pub reflectivity: f32,
    /// 0 = opaque, 1 = fully transparent
    pub transparency: f32,
    /// Index of refraction (1.0 = air, 1.5 = glass)
    pub refractive_index: f32,
}

impl Material {
    /// Create a plain diffuse material with default Phong coefficients.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Set the Phong coefficients.
    pub fn with_phong(mut self, ambient: f32, diffuse: f32, specular: f32, shininess: f32) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    /// Set mirror reflectivity, clamped to [0, 1].
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = Interval::UNIT.clamp(reflectivity);
        self
    }

    /// Set transparency (clamped to [0, 1]) and the index of refraction.
    pub fn with_transparency(mut self, transparency: f32, refractive_index: f32) -> Self {
        self.transparency = Interval::UNIT.clamp(transparency);
        self.refractive_index = refractive_index.max(NORMALIZE_EPSILON);
        self
    }

    /// True if the tracer spawns any secondary ray from this surface.
    pub fn is_specular(&self) -> bool {
        self.reflectivity > 0.0 || self.transparency > 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::ONE,
            ambient: 0.1,
            diffuse: 0.7,
            specular: 0.2,
            shininess: 32.0,
            reflectivity: 0.0,
            transparency: 0.0,
            refractive_index: 1.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_defaults() {
        let mat = Material::new(Color::new(0.5, 0.25, 1.0));
        assert_eq!(mat.color, Color::new(0.5, 0.25, 1.0));
        assert_eq!(mat.reflectivity, 0.0);
        assert_eq!(mat.transparency, 0.0);
        assert!(!mat.is_specular());
    }

    #[test]
    fn test_material_clamps_coefficients() {
        let mat = Material::default()
            .with_reflectivity(1.7)
            .with_transparency(-0.3, 0.0);

        assert_eq!(mat.reflectivity, 1.0);
        assert_eq!(mat.transparency, 0.0);
        assert!(mat.refractive_index > 0.0);
        assert!(mat.is_specular());
    }
}
