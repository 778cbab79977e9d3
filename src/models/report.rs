//! Measurement and report types
//!
//! Contains the raw per-workload measurement, the immutable aggregate
//! report returned by a benchmark run, and the performance tier
//! classification derived from the compute score.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bench::score;

/// Raw measurement produced by one workload generator.
///
/// `raw_metric` is the quantity of work performed: an operation count for
/// the compute workload, a byte count for the memory and storage workloads
/// and a frame count for the image workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadResult {
    /// Wall-clock time the workload took
    pub elapsed: Duration,
    /// Amount of work performed (operations, bytes or frames)
    pub raw_metric: u64,
}

impl WorkloadResult {
    pub fn new(elapsed: Duration, raw_metric: u64) -> Self {
        Self {
            elapsed,
            raw_metric,
        }
    }
}

/// The storage workload's two timed phases.
///
/// Kept separate because storage is scored against the average of the two
/// phase times rather than their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageTiming {
    /// Time to write the full buffer out
    pub write: Duration,
    /// Time to read the file back
    pub read: Duration,
}

impl StorageTiming {
    pub fn new(write: Duration, read: Duration) -> Self {
        Self { write, read }
    }

    /// Total time spent on disk I/O
    pub fn total(&self) -> Duration {
        self.write + self.read
    }
}

/// Qualitative performance tier derived from the compute score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceTier {
    Low,
    Medium,
    Good,
    High,
}

impl PerformanceTier {
    /// Classify a compute score. Total over all scores; boundaries are
    /// inclusive below and exclusive above.
    pub fn from_score(score: u64) -> Self {
        if score < 500 {
            PerformanceTier::Low
        } else if score < 2000 {
            PerformanceTier::Medium
        } else if score < 5000 {
            PerformanceTier::Good
        } else {
            PerformanceTier::High
        }
    }

    /// Human-readable assessment shown alongside the scores
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceTier::Low => "Low performance. Suitable only for basic tasks.",
            PerformanceTier::Medium => {
                "Medium performance. Good for office work and light gaming."
            }
            PerformanceTier::Good => {
                "Good performance. Supports modern games and video editing."
            }
            PerformanceTier::High => "High performance! Ideal for AAA games and heavy tasks.",
        }
    }

    /// Severity color for the shell to render the label in
    pub fn color(&self) -> &'static str {
        match self {
            PerformanceTier::Low => "red",
            PerformanceTier::Medium => "orange",
            PerformanceTier::Good => "green",
            PerformanceTier::High => "darkgreen",
        }
    }
}

/// System identification labels captured at benchmark time.
///
/// Labels only; nothing here feeds the scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name and architecture
    pub os: String,
    /// CPU brand string
    pub cpu: String,
    /// Total system memory in bytes
    pub memory_total: u64,
}

impl SystemInfo {
    /// Detect labels for the current machine
    pub fn detect() -> Self {
        let sys = sysinfo::System::new_all();

        let os_name = sysinfo::System::long_os_version()
            .unwrap_or_else(|| std::env::consts::OS.to_string());
        let cpu = sys
            .cpus()
            .first()
            .map(|c| c.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| "Unknown CPU".to_string());

        Self {
            os: format!("{} ({})", os_name, std::env::consts::ARCH),
            cpu,
            memory_total: sys.total_memory(),
        }
    }
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            os: format!("{} ({})", std::env::consts::OS, std::env::consts::ARCH),
            cpu: "Unknown CPU".to_string(),
            memory_total: 0,
        }
    }
}

/// Complete benchmark report: one normalized score per subsystem plus the
/// tier classification. Created once per run and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Timestamp when the run finished
    pub timestamp: DateTime<Utc>,
    /// System labels captured for display
    pub system: SystemInfo,
    /// Compute throughput in kilo-operations per second
    pub compute_score: u64,
    /// Wall-clock time of the compute workload
    #[serde(with = "duration_serde")]
    pub compute_elapsed: Duration,
    /// Memory bandwidth in MiB per second
    pub memory_score_mbps: u64,
    /// Storage throughput in MiB per second (averaged write/read rate)
    pub storage_score_mbps: u64,
    /// Image pipeline throughput in frames per second
    pub image_fps: u64,
    /// Tier derived from the compute score
    pub tier: PerformanceTier,
}

impl BenchmarkReport {
    /// Score the four raw measurements and assemble the report.
    ///
    /// This is the only way a report is produced; the runner feeds it real
    /// measurements and tests feed it fixed ones.
    pub fn from_measurements(
        system: SystemInfo,
        compute: &WorkloadResult,
        memory: &WorkloadResult,
        storage: &WorkloadResult,
        storage_timing: &StorageTiming,
        image: &WorkloadResult,
    ) -> Self {
        let compute_score = score::compute_score(compute.raw_metric, compute.elapsed);

        Self {
            timestamp: Utc::now(),
            system,
            compute_score,
            compute_elapsed: compute.elapsed,
            memory_score_mbps: score::memory_score_mbps(memory.raw_metric, memory.elapsed),
            storage_score_mbps: score::storage_score_mbps(
                storage.raw_metric,
                storage_timing.write,
                storage_timing.read,
            ),
            image_fps: score::image_fps(image.raw_metric, image.elapsed),
            tier: PerformanceTier::from_score(compute_score),
        }
    }

    /// One-line text rendering of the report
    pub fn summary(&self) -> String {
        format!(
            "CPU {} kops/s in {:.2}s | RAM {} MB/s | Storage {} MB/s | Image {} FPS | {:?}",
            self.compute_score,
            self.compute_elapsed.as_secs_f64(),
            self.memory_score_mbps,
            self.storage_score_mbps,
            self.image_fps,
            self.tier,
        )
    }
}

// Durations serialize as integer nanoseconds
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_nanos().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nanos = u128::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_exact() {
        assert_eq!(PerformanceTier::from_score(0), PerformanceTier::Low);
        assert_eq!(PerformanceTier::from_score(499), PerformanceTier::Low);
        assert_eq!(PerformanceTier::from_score(500), PerformanceTier::Medium);
        assert_eq!(PerformanceTier::from_score(1999), PerformanceTier::Medium);
        assert_eq!(PerformanceTier::from_score(2000), PerformanceTier::Good);
        assert_eq!(PerformanceTier::from_score(4999), PerformanceTier::Good);
        assert_eq!(PerformanceTier::from_score(5000), PerformanceTier::High);
        assert_eq!(PerformanceTier::from_score(u64::MAX), PerformanceTier::High);
    }

    #[test]
    fn tier_labels_and_colors() {
        assert!(PerformanceTier::Low.label().contains("basic tasks"));
        assert!(PerformanceTier::Medium.label().contains("office work"));
        assert!(PerformanceTier::Good.label().contains("video editing"));
        assert!(PerformanceTier::High.label().contains("AAA games"));

        assert_eq!(PerformanceTier::Low.color(), "red");
        assert_eq!(PerformanceTier::Medium.color(), "orange");
        assert_eq!(PerformanceTier::Good.color(), "green");
        assert_eq!(PerformanceTier::High.color(), "darkgreen");
    }

    #[test]
    fn report_from_fixed_measurements() {
        // The reference end-to-end scenario: fixed timings must reproduce
        // exactly these scores and a Medium tier.
        let compute = WorkloadResult::new(Duration::from_secs(10), 10_000_000);
        let memory = WorkloadResult::new(Duration::from_secs(1), 104_857_600);
        let storage = WorkloadResult::new(Duration::from_secs(2), 104_857_600);
        let timing = StorageTiming::new(Duration::from_secs(1), Duration::from_secs(1));
        let image = WorkloadResult::new(Duration::from_secs(1), 100);

        let report = BenchmarkReport::from_measurements(
            SystemInfo::default(),
            &compute,
            &memory,
            &storage,
            &timing,
            &image,
        );

        assert_eq!(report.compute_score, 1000);
        assert_eq!(report.compute_elapsed, Duration::from_secs(10));
        assert_eq!(report.memory_score_mbps, 100);
        assert_eq!(report.storage_score_mbps, 100);
        assert_eq!(report.image_fps, 100);
        assert_eq!(report.tier, PerformanceTier::Medium);
        assert!(report.timestamp <= Utc::now());
    }

    #[test]
    fn storage_timing_total() {
        let timing = StorageTiming::new(Duration::from_millis(300), Duration::from_millis(200));
        assert_eq!(timing.total(), Duration::from_millis(500));
    }

    #[test]
    fn report_summary_mentions_every_score() {
        let report = BenchmarkReport::from_measurements(
            SystemInfo::default(),
            &WorkloadResult::new(Duration::from_secs(10), 10_000_000),
            &WorkloadResult::new(Duration::from_secs(1), 104_857_600),
            &WorkloadResult::new(Duration::from_secs(2), 104_857_600),
            &StorageTiming::new(Duration::from_secs(1), Duration::from_secs(1)),
            &WorkloadResult::new(Duration::from_secs(1), 100),
        );

        let summary = report.summary();
        assert!(summary.contains("1000 kops/s"));
        assert!(summary.contains("100 MB/s"));
        assert!(summary.contains("100 FPS"));
        assert!(summary.contains("Medium"));
    }

    #[test]
    fn report_serde_round_trip() {
        let report = BenchmarkReport::from_measurements(
            SystemInfo::default(),
            &WorkloadResult::new(Duration::from_millis(2500), 10_000_000),
            &WorkloadResult::new(Duration::from_millis(900), 104_857_600),
            &WorkloadResult::new(Duration::from_millis(1800), 104_857_600),
            &StorageTiming::new(Duration::from_millis(1000), Duration::from_millis(800)),
            &WorkloadResult::new(Duration::from_secs(4), 100),
        );

        let json = serde_json::to_string(&report).expect("serialize");
        let parsed: BenchmarkReport = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(parsed.compute_score, report.compute_score);
        assert_eq!(parsed.compute_elapsed, report.compute_elapsed);
        assert_eq!(parsed.memory_score_mbps, report.memory_score_mbps);
        assert_eq!(parsed.storage_score_mbps, report.storage_score_mbps);
        assert_eq!(parsed.image_fps, report.image_fps);
        assert_eq!(parsed.tier, report.tier);
        assert_eq!(parsed.timestamp, report.timestamp);
    }
}
