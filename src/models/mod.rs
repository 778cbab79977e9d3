//! Benchmark data models
//!
//! Raw workload measurements, the aggregate report and the qualitative
//! performance tier classification.

pub mod report;

pub use report::{
    BenchmarkReport, PerformanceTier, StorageTiming, SystemInfo, WorkloadResult,
};
