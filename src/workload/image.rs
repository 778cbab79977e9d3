//! Image-processing workload
//!
//! Runs a fixed number of frames through a blur + edge-detection pipeline
//! on freshly randomized RGB data. Stands in for GPU-class throughput
//! without requiring GPU access; frame generation happens inside the timed
//! region, as does every pipeline pass.

use std::hint::black_box;
use std::time::Instant;

use image::{imageops, ImageBuffer, RgbImage};
use imageproc::edges;
use imageproc::filter;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use crate::config::WorkloadConfig;
use crate::models::WorkloadResult;
use crate::workload::allocate_buffer;
use crate::{RigmarkError, Result};

/// Gaussian sigma matching a 5x5 blur kernel.
pub const BLUR_SIGMA: f32 = 1.1;
/// Canny hysteresis thresholds.
pub const CANNY_LOW: f32 = 100.0;
pub const CANNY_HIGH: f32 = 200.0;

/// Synthetic vision-pipeline workload.
pub struct ImageWorkload {
    frames: u32,
    size: u32,
}

impl ImageWorkload {
    pub fn new(config: &WorkloadConfig) -> Self {
        Self {
            frames: config.image_frames,
            size: config.image_size,
        }
    }

    /// Run the pipeline over every frame and measure the total elapsed time.
    pub fn run(&self) -> Result<WorkloadResult> {
        let len = self.size as usize * self.size as usize * 3;
        let raw = allocate_buffer(len, "image")?;

        // One frame buffer reused across iterations; each iteration refills
        // it with fresh random pixels.
        let mut frame: RgbImage = ImageBuffer::from_raw(self.size, self.size, raw)
            .ok_or_else(|| RigmarkError::Benchmark("Image buffer size mismatch".to_string()))?;

        let mut rng = SmallRng::from_entropy();

        let start = Instant::now();

        let mut edge_pixels: u64 = 0;
        for _ in 0..self.frames {
            rng.fill_bytes(&mut *frame);

            let blurred = filter::gaussian_blur_f32(&frame, BLUR_SIGMA);
            let gray = imageops::grayscale(&blurred);
            let edges = edges::canny(&gray, CANNY_LOW, CANNY_HIGH);

            edge_pixels += edges.iter().filter(|&&p| p > 0).count() as u64;
        }

        let elapsed = start.elapsed();

        black_box(edge_pixels);
        debug!(
            frames = self.frames,
            size = self.size,
            edge_pixels,
            elapsed_secs = elapsed.as_secs_f64(),
            "image workload finished"
        );

        Ok(WorkloadResult::new(elapsed, self.frames as u64))
    }
}
