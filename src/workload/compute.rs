//! Compute workload
//!
//! A fixed count of pseudo-arithmetic operations: each step squares the
//! loop index, reduces it modulo a prime-ish constant and folds it into an
//! accumulator. The accumulator escapes through `black_box` so the loop
//! cannot be eliminated as dead code.

use std::hint::black_box;
use std::time::Instant;

use tracing::debug;

use crate::config::WorkloadConfig;
use crate::models::WorkloadResult;
use crate::Result;

/// Modulus applied to each squared index.
pub const COMPUTE_MODULUS: u64 = 1_234_567;

/// Fixed-size integer arithmetic workload.
pub struct ComputeWorkload {
    operations: u64,
}

impl ComputeWorkload {
    pub fn new(config: &WorkloadConfig) -> Self {
        Self {
            operations: config.compute_ops,
        }
    }

    /// Run the arithmetic loop and measure its wall-clock time.
    pub fn run(&self) -> Result<WorkloadResult> {
        let start = Instant::now();

        let mut accumulator: u64 = 0;
        for i in 0..self.operations {
            accumulator = accumulator.wrapping_add(i.wrapping_mul(i) % COMPUTE_MODULUS);
        }

        let elapsed = start.elapsed();

        black_box(accumulator);
        debug!(
            operations = self.operations,
            accumulator,
            elapsed_secs = elapsed.as_secs_f64(),
            "compute workload finished"
        );

        Ok(WorkloadResult::new(elapsed, self.operations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_configured_operation_count() {
        let config = WorkloadConfig::default().with_compute_ops(10_000);
        let result = ComputeWorkload::new(&config).run().unwrap();

        assert_eq!(result.raw_metric, 10_000);
        assert!(result.elapsed.as_nanos() > 0);
    }

    #[test]
    fn operation_count_tracks_config_not_host_speed() {
        let config = WorkloadConfig::default().with_compute_ops(1_000);
        let first = ComputeWorkload::new(&config).run().unwrap();
        let second = ComputeWorkload::new(&config).run().unwrap();

        assert_eq!(first.raw_metric, second.raw_metric);
    }
}
