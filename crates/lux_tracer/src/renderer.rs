//! Progressive Whitted renderer.
//!
//! Renders the image in row batches. The caller drives the render one batch
//! at a time with [`ProgressiveRenderer::step`], getting control back after
//! every batch along with the completed fraction. Each batch owns an RNG
//! stream seeded from the render seed and the batch index, so the result is
//! the same whether batches run in order or in parallel.

use crate::batch::{generate_batches, render_batch, RowBatch, DEFAULT_ROWS_PER_BATCH};
use crate::tracer::MAX_DEPTH;
use crate::{Camera, Color, Scene, Tracer};
use lux_math::Interval;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Errors from the renderer API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("A render is already in progress")]
    AlreadyRendering,

    #[error("No render in progress")]
    NotRendering,

    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Shadow rays per area light
    pub shadow_samples: u32,
    /// Rows rendered per step
    pub rows_per_batch: u32,
    /// Weight of the scene's ambient light in the ambient term
    pub ambient_weight: f32,
    /// Seed for the per-batch RNG streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            shadow_samples: 16,
            rows_per_batch: DEFAULT_ROWS_PER_BATCH,
            ambient_weight: 0.5,
            seed: 0,
        }
    }
}

impl RenderConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_shadow_samples(mut self, samples: u32) -> Self {
        self.shadow_samples = samples;
        self
    }

    pub fn with_rows_per_batch(mut self, rows: u32) -> Self {
        self.rows_per_batch = rows;
        self
    }

    pub fn with_ambient_weight(mut self, weight: f32) -> Self {
        self.ambient_weight = weight;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Apply gamma correction (gamma = 2.2) to a channel clamped to [0, 1].
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    Interval::UNIT.clamp(linear).powf(1.0 / 2.2)
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    // Apply gamma correction and convert to 0-255
    let r = (255.0 * linear_to_gamma(color.x)) as u8;
    let g = (255.0 * linear_to_gamma(color.y)) as u8;
    let b = (255.0 * linear_to_gamma(color.z)) as u8;
    [r, g, b, 255]
}

/// Render a single pixel: one ray through the pixel center.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let ray = camera.ray_for_pixel(x, y);
    Tracer::new(scene, config).trace(&ray, config.max_depth, rng)
}

/// RNG stream owned by one row batch.
pub fn batch_rng(seed: u64, index: usize) -> StdRng {
    let stream = (index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(seed ^ stream)
}

struct ActiveRender {
    batches: Vec<RowBatch>,
    next: usize,
    started: Instant,
}

/// Row-batched renderer with a re-entrancy guard.
pub struct ProgressiveRenderer {
    width: u32,
    height: u32,
    config: RenderConfig,
    camera: Camera,
    scene: Arc<Scene>,
    active: Option<ActiveRender>,
}

impl ProgressiveRenderer {
    /// Create a renderer for a `width` x `height` image with an empty scene.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            config: RenderConfig::default(),
            camera: Camera::new().with_resolution(width, height),
            scene: Arc::new(Scene::new()),
            active: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Size in bytes of the RGBA8 buffer `step` and `render` expect.
    pub fn buffer_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// True while a render started with `begin` has batches left.
    pub fn is_rendering(&self) -> bool {
        self.active.is_some()
    }

    fn ensure_idle(&self) -> Result<(), RenderError> {
        if self.active.is_some() {
            log::warn!("Rejected renderer change while a render is in progress");
            return Err(RenderError::AlreadyRendering);
        }
        Ok(())
    }

    fn check_buffer(&self, pixels: &[u8]) -> Result<(), RenderError> {
        let expected = self.buffer_len();
        if pixels.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(())
    }

    /// Set the recursion depth, clamped to `MAX_DEPTH`.
    pub fn set_max_depth(&mut self, max_depth: u32) -> Result<(), RenderError> {
        self.ensure_idle()?;
        if max_depth > MAX_DEPTH {
            log::warn!("Max depth {} clamped to {}", max_depth, MAX_DEPTH);
        }
        self.config.max_depth = max_depth.min(MAX_DEPTH);
        Ok(())
    }

    /// Replace the whole render configuration.
    pub fn set_config(&mut self, config: RenderConfig) -> Result<(), RenderError> {
        let max_depth = config.max_depth;
        self.ensure_idle()?;
        self.config = config;
        self.set_max_depth(max_depth)
    }

    /// Replace the camera, keeping the renderer's resolution.
    pub fn set_camera(&mut self, camera: Camera) -> Result<(), RenderError> {
        self.ensure_idle()?;
        self.camera = camera.with_resolution(self.width, self.height);
        Ok(())
    }

    /// Attach the scene to render.
    pub fn set_scene(&mut self, scene: impl Into<Arc<Scene>>) -> Result<(), RenderError> {
        self.ensure_idle()?;
        self.scene = scene.into();
        log::debug!(
            "Scene attached: {} primitives, {} lights",
            self.scene.len(),
            self.scene.lights().len()
        );
        Ok(())
    }

    /// Start a progressive render.
    ///
    /// Fails with `AlreadyRendering` if a render has batches left; the
    /// active render is left untouched.
    pub fn begin(&mut self) -> Result<(), RenderError> {
        if self.active.is_some() {
            log::warn!("Render requested while another is in progress");
            return Err(RenderError::AlreadyRendering);
        }

        let batches = generate_batches(self.height, self.config.rows_per_batch);
        log::info!(
            "Rendering {}x{} in {} batches (max depth {}, {} shadow samples)",
            self.width,
            self.height,
            batches.len(),
            self.config.max_depth,
            self.config.shadow_samples
        );

        self.active = Some(ActiveRender {
            batches,
            next: 0,
            started: Instant::now(),
        });
        Ok(())
    }

    /// Render the next batch into `pixels` and return the completed fraction.
    ///
    /// The fraction grows with every call and is exactly 1.0 on the last
    /// batch, after which the render is finished.
    pub fn step(&mut self, pixels: &mut [u8]) -> Result<f32, RenderError> {
        self.check_buffer(pixels)?;
        let active = self.active.as_mut().ok_or(RenderError::NotRendering)?;

        let progress = match active.batches.get(active.next).copied() {
            Some(batch) => {
                let mut rng = batch_rng(self.config.seed, batch.index);
                let out = &mut pixels[batch.byte_range(self.width)];
                render_batch(&batch, &self.camera, &self.scene, &self.config, out, &mut rng);
                active.next += 1;

                log::debug!(
                    "Batch {}/{} done (rows {}..{})",
                    active.next,
                    active.batches.len(),
                    batch.start_row,
                    batch.end_row()
                );
                batch.end_row() as f32 / self.height as f32
            }
            None => 1.0,
        };

        if active.next < active.batches.len() {
            return Ok(progress);
        }

        log::info!("Render finished in {:.2?}", active.started.elapsed());
        self.active = None;
        Ok(1.0)
    }

    /// Run a full progressive render, reporting progress after every batch.
    pub fn render<F>(&mut self, pixels: &mut [u8], mut on_progress: F) -> Result<(), RenderError>
    where
        F: FnMut(f32),
    {
        self.check_buffer(pixels)?;
        self.begin()?;

        loop {
            let progress = self.step(pixels)?;
            on_progress(progress);
            if !self.is_rendering() {
                return Ok(());
            }
        }
    }

    /// Render every batch in parallel with rayon.
    ///
    /// Produces the same bytes as a progressive render with the same
    /// configuration.
    pub fn render_parallel(&mut self, pixels: &mut [u8]) -> Result<(), RenderError> {
        self.ensure_idle()?;
        self.check_buffer(pixels)?;
        if pixels.is_empty() {
            return Ok(());
        }

        let batches = generate_batches(self.height, self.config.rows_per_batch);
        let chunk_len = batches[0].byte_range(self.width).len();
        let started = Instant::now();
        log::info!(
            "Rendering {}x{} in {} parallel batches",
            self.width,
            self.height,
            batches.len()
        );

        let camera = &self.camera;
        let scene: &Scene = &self.scene;
        let config = &self.config;

        pixels
            .par_chunks_mut(chunk_len)
            .zip(batches.par_iter())
            .for_each(|(out, batch)| {
                let mut rng = batch_rng(config.seed, batch.index);
                render_batch(batch, camera, scene, config, out, &mut rng);
            });

        log::info!("Render finished in {:.2?}", started.elapsed());
        Ok(())
    }
}
