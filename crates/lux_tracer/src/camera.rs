//! Pinhole camera for ray generation.

use crate::Ray;
use lux_math::Vec3;

/// Pinhole camera at `eye` looking down -Z.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    eye: Vec3,
    fov: f32, // Vertical field of view in degrees

    // Cached computed values
    scale: f32,
    aspect: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        let mut camera = Self {
            image_width: 600,
            image_height: 600,
            eye: Vec3::new(0.0, 0.0, 600.0),
            fov: 40.0,
            scale: 0.0,
            aspect: 1.0,
        };
        camera.update();
        camera
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self.update();
        self
    }

    /// Set camera position.
    pub fn with_eye(mut self, eye: Vec3) -> Self {
        self.eye = eye;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self.update();
        self
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    fn update(&mut self) {
        self.scale = (self.fov.to_radians() / 2.0).tan();
        self.aspect = if self.image_height == 0 {
            1.0
        } else {
            self.image_width as f32 / self.image_height as f32
        };
    }

    /// Generate the ray through the center of pixel (x, y).
    ///
    /// Row 0 is the top of the image.
    pub fn ray_for_pixel(&self, x: u32, y: u32) -> Ray {
        let width = self.image_width.max(1) as f32;
        let height = self.image_height.max(1) as f32;

        let px = (2.0 * (x as f32 + 0.5) / width - 1.0) * self.aspect * self.scale;
        let py = (1.0 - 2.0 * (y as f32 + 0.5) / height) * self.scale;

        Ray::new(self.eye, Vec3::new(px, py, -1.0))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
