//! Score conversion
//!
//! Pure functions turning raw measurements into normalized integer scores.
//! All four use truncating (floor) division; changing that would break
//! comparability with previously published scores.

use std::time::Duration;

/// Floor applied to elapsed time before any division.
///
/// A measurement at or below this is degenerate (the workload finished
/// faster than the clock can meaningfully resolve); clamping yields a very
/// large but finite score instead of a division blow-up. The clamp applies
/// to scoring only, never to the reported raw timing.
pub const MIN_ELAPSED_SECS: f64 = 0.001;

fn scoring_secs(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64().max(MIN_ELAPSED_SECS)
}

/// Compute score in kilo-operations per second
pub fn compute_score(operations: u64, elapsed: Duration) -> u64 {
    (operations as f64 / scoring_secs(elapsed) / 1000.0).floor() as u64
}

/// Memory bandwidth in MiB per second
pub fn memory_score_mbps(bytes: u64, elapsed: Duration) -> u64 {
    (bytes as f64 / scoring_secs(elapsed) / 1_048_576.0).floor() as u64
}

/// Storage throughput in MiB per second.
///
/// Divides by the average of the write and read times, not their sum; the
/// historical formula treats storage as a mean per-phase rate.
pub fn storage_score_mbps(bytes: u64, write: Duration, read: Duration) -> u64 {
    let avg_secs = ((write + read).as_secs_f64() / 2.0).max(MIN_ELAPSED_SECS);
    (bytes as f64 / avg_secs / 1_048_576.0).floor() as u64
}

/// Image pipeline throughput in frames per second
pub fn image_fps(frames: u64, elapsed: Duration) -> u64 {
    (frames as f64 / scoring_secs(elapsed)).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_score_is_kops_per_sec() {
        assert_eq!(compute_score(10_000_000, Duration::from_secs(10)), 1000);
        assert_eq!(compute_score(10_000_000, Duration::from_secs(1)), 10_000);
    }

    #[test]
    fn memory_score_floors_fractional_mib() {
        // Exactly 1 MiB/s
        assert_eq!(memory_score_mbps(1_048_576, Duration::from_secs(1)), 1);
        // One byte short of 2 MiB still floors to 1
        assert_eq!(memory_score_mbps(2_097_151, Duration::from_secs(1)), 1);
        assert_eq!(memory_score_mbps(2_097_152, Duration::from_secs(1)), 2);
    }

    #[test]
    fn storage_score_uses_average_phase_time() {
        // 100 MiB with 1s write + 1s read: average 1s -> 100 MB/s
        assert_eq!(
            storage_score_mbps(104_857_600, Duration::from_secs(1), Duration::from_secs(1)),
            100
        );
        // Same bytes over 2s+2s halves the rate
        assert_eq!(
            storage_score_mbps(104_857_600, Duration::from_secs(2), Duration::from_secs(2)),
            50
        );
        // Asymmetric phases average out
        assert_eq!(
            storage_score_mbps(
                104_857_600,
                Duration::from_millis(500),
                Duration::from_millis(1500)
            ),
            100
        );
    }

    #[test]
    fn image_fps_floors() {
        assert_eq!(image_fps(100, Duration::from_secs(1)), 100);
        assert_eq!(image_fps(100, Duration::from_millis(3000)), 33);
    }

    #[test]
    fn degenerate_elapsed_clamps_to_finite_score() {
        let huge = compute_score(10_000_000, Duration::from_nanos(1));
        // 10^7 ops over the 1ms floor: 10^10 ops/sec -> 10^7 kops
        assert_eq!(huge, 10_000_000);

        let mem = memory_score_mbps(104_857_600, Duration::ZERO);
        assert_eq!(mem, 100 * 1000);

        let fps = image_fps(100, Duration::ZERO);
        assert_eq!(fps, 100_000);

        let storage = storage_score_mbps(104_857_600, Duration::ZERO, Duration::ZERO);
        assert_eq!(storage, 100 * 1000);
    }

    #[test]
    fn zero_work_scores_zero() {
        assert_eq!(compute_score(0, Duration::from_secs(1)), 0);
        assert_eq!(memory_score_mbps(0, Duration::from_secs(1)), 0);
        assert_eq!(
            storage_score_mbps(0, Duration::from_secs(1), Duration::from_secs(1)),
            0
        );
        assert_eq!(image_fps(0, Duration::from_secs(1)), 0);
    }
}
