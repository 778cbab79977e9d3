//! Workload generators
//!
//! Four independent, deterministic units of synthetic work, one per
//! subsystem. Each owns its buffers, runs a fixed amount of work and
//! reports elapsed wall-clock time plus the raw work quantity.

pub mod compute;
pub mod image;
pub mod memory;
pub mod storage;

pub use compute::ComputeWorkload;
pub use image::ImageWorkload;
pub use memory::MemoryWorkload;
pub use storage::StorageWorkload;

use crate::{RigmarkError, Result};

/// Benchmark stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Compute,
    Memory,
    Storage,
    Image,
}

impl Stage {
    /// Get a human-readable description of the stage
    pub fn description(&self) -> &'static str {
        match self {
            Stage::Compute => "Compute",
            Stage::Memory => "Memory",
            Stage::Storage => "Storage",
            Stage::Image => "Image processing",
        }
    }
}

/// Fallibly allocate a zeroed workload buffer.
///
/// Buffers here are large enough that a failed allocation is an expected
/// error condition, not a programmer bug, so it surfaces as
/// [`RigmarkError::Allocation`] instead of aborting.
pub(crate) fn allocate_buffer(len: usize, label: &str) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|e| {
        RigmarkError::Allocation(format!("{} buffer of {} bytes: {}", label, len, e))
    })?;
    buffer.resize(len, 0);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_descriptions() {
        assert_eq!(Stage::Compute.description(), "Compute");
        assert_eq!(Stage::Memory.description(), "Memory");
        assert_eq!(Stage::Storage.description(), "Storage");
        assert_eq!(Stage::Image.description(), "Image processing");
    }

    #[test]
    fn allocate_buffer_is_zeroed() {
        let buffer = allocate_buffer(4096, "test").unwrap();
        assert_eq!(buffer.len(), 4096);
        assert!(buffer.iter().all(|&b| b == 0));
    }
}
