//! Benchmark orchestration
//!
//! Runs the four workloads strictly in sequence (compute, memory, storage,
//! image), scores the measurements and assembles the report. The async
//! facade streams per-stage progress and honors cancellation between, but
//! never within, stages.

use std::time::Instant;

use tokio::sync::{mpsc, oneshot};
use tokio::task;
use tracing::info;

use crate::config::WorkloadConfig;
use crate::models::{BenchmarkReport, SystemInfo};
use crate::workload::{
    ComputeWorkload, ImageWorkload, MemoryWorkload, Stage, StorageWorkload,
};
use crate::{RigmarkError, Result};

/// Progress event sent before and after each stage.
#[derive(Debug, Clone)]
pub enum StageProgress {
    /// The stage is about to run
    Started { stage: Stage },
    /// The stage completed; elapsed is the stage wall-clock time
    Finished {
        stage: Stage,
        elapsed: std::time::Duration,
    },
}

/// Sequential benchmark runner.
pub struct BenchmarkRunner {
    config: WorkloadConfig,
}

impl BenchmarkRunner {
    /// Create a runner, validating the configuration up front.
    pub fn new(config: WorkloadConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    /// Run all four workloads in order and return the complete report.
    ///
    /// Blocking; a fatal failure in any workload aborts the run with no
    /// partial report. The only side effect is the storage workload's
    /// scratch file, which is gone by the time this returns.
    pub fn run(&self) -> Result<BenchmarkReport> {
        let system = SystemInfo::detect();
        info!("starting benchmark run");

        let compute = ComputeWorkload::new(&self.config).run()?;
        info!(elapsed_secs = compute.elapsed.as_secs_f64(), "compute stage done");

        let memory = MemoryWorkload::new(&self.config).run()?;
        info!(elapsed_secs = memory.elapsed.as_secs_f64(), "memory stage done");

        let (storage, storage_timing) = StorageWorkload::new(&self.config).run()?;
        info!(elapsed_secs = storage.elapsed.as_secs_f64(), "storage stage done");

        let image = ImageWorkload::new(&self.config).run()?;
        info!(elapsed_secs = image.elapsed.as_secs_f64(), "image stage done");

        let report = BenchmarkReport::from_measurements(
            system,
            &compute,
            &memory,
            &storage,
            &storage_timing,
            &image,
        );
        info!(summary = %report.summary(), "benchmark run complete");

        Ok(report)
    }

    /// Run the benchmark off the async runtime, streaming stage progress.
    ///
    /// Each stage executes on the blocking pool. The cancellation receiver
    /// is polled between stages only; once a workload has started it runs
    /// to completion so its measurement stays comparable.
    pub async fn run_with_progress(
        &self,
        progress_tx: mpsc::Sender<StageProgress>,
        mut cancel_rx: oneshot::Receiver<()>,
    ) -> Result<BenchmarkReport> {
        let system = SystemInfo::detect();
        info!("starting benchmark run");

        check_cancelled(&mut cancel_rx)?;
        let workload = ComputeWorkload::new(&self.config);
        let compute = run_stage(Stage::Compute, &progress_tx, move || workload.run()).await?;

        check_cancelled(&mut cancel_rx)?;
        let workload = MemoryWorkload::new(&self.config);
        let memory = run_stage(Stage::Memory, &progress_tx, move || workload.run()).await?;

        check_cancelled(&mut cancel_rx)?;
        let workload = StorageWorkload::new(&self.config);
        let (storage, storage_timing) =
            run_stage(Stage::Storage, &progress_tx, move || workload.run()).await?;

        check_cancelled(&mut cancel_rx)?;
        let workload = ImageWorkload::new(&self.config);
        let image = run_stage(Stage::Image, &progress_tx, move || workload.run()).await?;

        let report = BenchmarkReport::from_measurements(
            system,
            &compute,
            &memory,
            &storage,
            &storage_timing,
            &image,
        );
        info!(summary = %report.summary(), "benchmark run complete");

        Ok(report)
    }
}

/// Execute one stage on the blocking pool, bracketed by progress events.
async fn run_stage<T, F>(
    stage: Stage,
    progress_tx: &mpsc::Sender<StageProgress>,
    job: F,
) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    // A dropped receiver means the caller walked away from the run
    if progress_tx
        .send(StageProgress::Started { stage })
        .await
        .is_err()
    {
        return Err(RigmarkError::Cancelled);
    }

    let started = Instant::now();
    let output = task::spawn_blocking(job).await.map_err(|e| {
        RigmarkError::Benchmark(format!("{} stage panicked: {}", stage.description(), e))
    })??;

    let _ = progress_tx
        .send(StageProgress::Finished {
            stage,
            elapsed: started.elapsed(),
        })
        .await;

    Ok(output)
}

fn check_cancelled(cancel_rx: &mut oneshot::Receiver<()>) -> Result<()> {
    match cancel_rx.try_recv() {
        Ok(()) => Err(RigmarkError::Cancelled),
        // Sender dropped without firing: the caller gave up its right to
        // cancel, keep going
        Err(oneshot::error::TryRecvError::Closed) => Ok(()),
        Err(oneshot::error::TryRecvError::Empty) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = WorkloadConfig::default().with_compute_ops(0);
        assert!(BenchmarkRunner::new(config).is_err());

        let config =
            WorkloadConfig::default().with_scratch_dir(PathBuf::from("/nonexistent/rigmark"));
        assert!(BenchmarkRunner::new(config).is_err());
    }

    #[tokio::test]
    async fn pre_fired_cancellation_aborts_before_any_stage() {
        let dir = tempfile::tempdir().unwrap();
        let config = scaled_down_config(dir.path().to_path_buf());
        let runner = BenchmarkRunner::new(config).unwrap();

        let (progress_tx, mut progress_rx) = mpsc::channel(16);
        let (cancel_tx, cancel_rx) = oneshot::channel();
        cancel_tx.send(()).unwrap();

        let result = runner.run_with_progress(progress_tx, cancel_rx).await;
        assert!(matches!(result, Err(RigmarkError::Cancelled)));

        // No stage ever started
        assert!(progress_rx.try_recv().is_err());
    }

    fn scaled_down_config(scratch: PathBuf) -> WorkloadConfig {
        WorkloadConfig::default()
            .with_compute_ops(10_000)
            .with_memory_bytes(64 * 1024)
            .with_memory_passes(2)
            .with_storage_bytes(64 * 1024)
            .with_scratch_dir(scratch)
            .with_image_frames(1)
            .with_image_size(16)
    }
}
