//! Point and area lights.

use crate::Color;
use lux_math::Vec3;

/// A light source.
///
/// With `radius == 0` this is a point light and casts hard shadows. A
/// positive radius turns it into a horizontal disk that is sampled
/// stochastically for soft shadows. Lights are not attenuated with distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
    pub radius: f32,
}

impl Light {
    /// Create a point light.
    pub fn point(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
            radius: 0.0,
        }
    }

    /// Create a disk-shaped area light.
    pub fn area(position: Vec3, color: Color, intensity: f32, radius: f32) -> Self {
        Self {
            position,
            color,
            intensity,
            radius: radius.max(0.0),
        }
    }

    /// True if shadows from this light need more than one sample.
    pub fn is_area(&self) -> bool {
        self.radius > 0.0
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::point(Vec3::ZERO, Color::ONE, 1.0)
    }
}
