//! Storage workload
//!
//! Writes a buffer of random bytes to a scratch file, reads it back and
//! times the two phases separately. The scratch file is removed on every
//! exit path: explicitly on success (a failed removal is an error, not a
//! shrug) and via `Drop` if either phase fails.

use std::hint::black_box;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use crate::config::WorkloadConfig;
use crate::io::TempFile;
use crate::models::{StorageTiming, WorkloadResult};
use crate::workload::allocate_buffer;
use crate::{RigmarkError, Result, StoragePhase};

/// Disk throughput workload.
pub struct StorageWorkload {
    bytes: usize,
    scratch_dir: PathBuf,
}

impl StorageWorkload {
    pub fn new(config: &WorkloadConfig) -> Self {
        Self {
            bytes: config.storage_bytes,
            scratch_dir: config.scratch_dir.clone(),
        }
    }

    /// Write the buffer out, read it back and time both phases.
    ///
    /// The write is buffered and flushed, not synced; the measurement
    /// deliberately includes the OS cache the same way the scores were
    /// originally calibrated.
    pub fn run(&self) -> Result<(WorkloadResult, StorageTiming)> {
        let mut data = allocate_buffer(self.bytes, "storage")?;
        let mut rng = SmallRng::from_entropy();
        rng.fill_bytes(&mut data);

        let mut temp = TempFile::create(&self.scratch_dir)
            .map_err(|e| storage_error(StoragePhase::Create, e))?;

        let write_start = Instant::now();
        temp.file
            .write_all(&data)
            .and_then(|_| temp.file.flush())
            .map_err(|e| storage_error(StoragePhase::Write, e))?;
        let write = write_start.elapsed();

        drop(data);

        let mut readback = Vec::new();
        readback
            .try_reserve_exact(self.bytes)
            .map_err(|e| RigmarkError::Allocation(format!("storage read buffer: {}", e)))?;

        let read_start = Instant::now();
        let mut file = std::fs::File::open(temp.path())
            .map_err(|e| storage_error(StoragePhase::Read, e))?;
        let bytes_read = file
            .read_to_end(&mut readback)
            .map_err(|e| storage_error(StoragePhase::Read, e))?;
        let read = read_start.elapsed();

        black_box(readback.as_slice());

        if bytes_read != self.bytes {
            return Err(RigmarkError::Benchmark(format!(
                "Storage read returned {} bytes, expected {}",
                bytes_read, self.bytes
            )));
        }

        temp.remove()
            .map_err(|e| storage_error(StoragePhase::Remove, e))?;

        debug!(
            bytes = self.bytes,
            write_secs = write.as_secs_f64(),
            read_secs = read.as_secs_f64(),
            "storage workload finished"
        );

        let timing = StorageTiming::new(write, read);
        Ok((
            WorkloadResult::new(timing.total(), self.bytes as u64),
            timing,
        ))
    }
}

fn storage_error(phase: StoragePhase, source: std::io::Error) -> RigmarkError {
    RigmarkError::Storage { phase, source }
}
