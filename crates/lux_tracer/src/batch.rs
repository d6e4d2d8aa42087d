//! Row batches for progressive rendering.
//!
//! The image is split into contiguous runs of rows, rendered top to bottom.
//! Each batch is independent: it owns its RNG stream, so batches can also be
//! rendered in parallel with rayon.

use crate::renderer::{color_to_rgba, render_pixel};
use crate::{Camera, RenderConfig, Scene};
use rand::RngCore;

/// A contiguous range of image rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBatch {
    /// First row of the batch
    pub start_row: u32,
    /// Number of rows in the batch
    pub row_count: u32,
    /// Index of this batch in render order
    pub index: usize,
}

impl RowBatch {
    /// Create a new batch.
    pub fn new(start_row: u32, row_count: u32, index: usize) -> Self {
        Self {
            start_row,
            row_count,
            index,
        }
    }

    /// One past the last row of the batch.
    pub fn end_row(&self) -> u32 {
        self.start_row + self.row_count
    }

    /// Byte range of this batch in a row-major RGBA8 buffer of `width` pixels.
    pub fn byte_range(&self, width: u32) -> std::ops::Range<usize> {
        let row_bytes = width as usize * 4;
        self.start_row as usize * row_bytes..self.end_row() as usize * row_bytes
    }

    /// Get the total number of pixels in this batch.
    pub fn pixel_count(&self, width: u32) -> u32 {
        width * self.row_count
    }
}

/// Default number of rows per batch.
pub const DEFAULT_ROWS_PER_BATCH: u32 = 5;

/// Split `height` rows into batches of `rows_per_batch`, top to bottom.
///
/// The last batch may be shorter. A batch size of 0 is treated as 1.
pub fn generate_batches(height: u32, rows_per_batch: u32) -> Vec<RowBatch> {
    let rows_per_batch = rows_per_batch.max(1);
    let mut batches = Vec::new();

    let mut y = 0;
    while y < height {
        let rows = rows_per_batch.min(height - y);
        batches.push(RowBatch::new(y, rows, batches.len()));
        y += rows;
    }

    batches
}

/// Render one batch into `out`, the batch's slice of the RGBA8 buffer.
pub fn render_batch(
    batch: &RowBatch,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    out: &mut [u8],
    rng: &mut dyn RngCore,
) {
    let width = camera.image_width;
    debug_assert_eq!(out.len(), batch.pixel_count(width) as usize * 4);
    if width == 0 {
        return;
    }

    for (local_y, row) in out.chunks_exact_mut(width as usize * 4).enumerate() {
        let y = batch.start_row + local_y as u32;
        for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
            let color = render_pixel(camera, scene, x as u32, y, config, rng);
            pixel.copy_from_slice(&color_to_rgba(color));
        }
    }
}
