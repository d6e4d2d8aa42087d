//! JSON render options.
//!
//! An options file holds the render settings and the Cornell box options,
//! both optional:
//!
//! ```json
//! {
//!     "render": { "width": 400, "height": 400, "max_depth": 6 },
//!     "scene": { "mirror_wall": "back", "sphere2": { "transparent": true } }
//! }
//! ```

use std::path::Path;

use glam::Vec3;
use lux_tracer::{Camera, RenderConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cornell::CornellOptions;

/// Errors that can occur while loading options.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for option loading.
pub type SceneResult<T> = Result<T, SceneError>;

/// Image size and renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub max_depth: u32,
    pub shadow_samples: u32,
    pub rows_per_batch: u32,
    pub seed: u64,
    /// Camera position; the camera always looks down -Z
    pub eye: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Render all batches at once with rayon instead of progressively
    pub parallel: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        let config = RenderConfig::default();
        let camera = Camera::new();
        Self {
            width: 400,
            height: 400,
            max_depth: config.max_depth,
            shadow_samples: config.shadow_samples,
            rows_per_batch: config.rows_per_batch,
            seed: config.seed,
            eye: camera.eye(),
            fov: camera.fov(),
            parallel: false,
        }
    }
}

impl RenderOptions {
    /// Renderer configuration for these options.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::default()
            .with_max_depth(self.max_depth)
            .with_shadow_samples(self.shadow_samples)
            .with_rows_per_batch(self.rows_per_batch)
            .with_seed(self.seed)
    }

    /// Camera for these options, sized to the output image.
    pub fn camera(&self) -> Camera {
        Camera::new()
            .with_eye(self.eye)
            .with_fov(self.fov)
            .with_resolution(self.width, self.height)
    }
}

/// Contents of an options file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuxOptions {
    pub render: RenderOptions,
    pub scene: CornellOptions,
}

impl LuxOptions {
    /// Parse options from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load options from a JSON file.
pub fn load_options(path: impl AsRef<Path>) -> SceneResult<LuxOptions> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let options = LuxOptions::from_json_str(&json)?;
    log::info!("Loaded options from {}", path.display());
    Ok(options)
}
