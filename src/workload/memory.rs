//! Memory workload
//!
//! Allocates one contiguous buffer and repeatedly writes a fixed byte
//! across the first half, then reads that half back through a checksum.
//! The checksum escapes through `black_box` so neither pass can be
//! optimized into a no-op.

use std::hint::black_box;
use std::time::Instant;

use tracing::debug;

use crate::config::WorkloadConfig;
use crate::models::WorkloadResult;
use crate::workload::allocate_buffer;
use crate::Result;

/// Byte value written across the buffer each pass.
pub const FILL_BYTE: u8 = b'1';

/// Memory bandwidth workload.
pub struct MemoryWorkload {
    bytes: usize,
    passes: u32,
}

impl MemoryWorkload {
    pub fn new(config: &WorkloadConfig) -> Self {
        Self {
            bytes: config.memory_bytes,
            passes: config.memory_passes,
        }
    }

    /// Run all write/read passes and measure the total elapsed time.
    ///
    /// `raw_metric` is the buffer size in bytes, not bytes times passes;
    /// the score formula is calibrated against the buffer size alone.
    pub fn run(&self) -> Result<WorkloadResult> {
        let mut buffer = allocate_buffer(self.bytes, "memory")?;
        let half = self.bytes / 2;

        let start = Instant::now();

        let mut checksum: u64 = 0;
        for _ in 0..self.passes {
            buffer[..half].fill(FILL_BYTE);

            let mut sum: u64 = 0;
            for &byte in &buffer[..half] {
                sum = sum.wrapping_add(byte as u64);
            }
            checksum = checksum.wrapping_add(sum);
        }

        let elapsed = start.elapsed();

        black_box(checksum);
        debug!(
            bytes = self.bytes,
            passes = self.passes,
            checksum,
            elapsed_secs = elapsed.as_secs_f64(),
            "memory workload finished"
        );

        Ok(WorkloadResult::new(elapsed, self.bytes as u64))
    }
}
