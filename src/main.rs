use rigmark::bench::{BenchmarkRunner, StageProgress};
use rigmark::config::WorkloadConfig;
use rigmark::models::SystemInfo;
use rigmark::util::units::{format_bytes, format_duration};
use rigmark::Result;
use tokio::sync::{mpsc, oneshot};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rigmark=warn")),
        )
        .with_target(false)
        .init();

    let json_output = std::env::args().any(|arg| arg == "--json");

    let system = SystemInfo::detect();
    if !json_output {
        println!("System: {}", system.os);
        println!("Processor: {}", system.cpu);
        println!("Total RAM: {}", format_bytes(system.memory_total));
        println!();
    }

    let config = WorkloadConfig::load()?;
    let runner = BenchmarkRunner::new(config)?;

    let (progress_tx, mut progress_rx) = mpsc::channel(16);
    // Held for the whole run; dropping it would not cancel, firing it would
    let (_cancel_tx, cancel_rx) = oneshot::channel();

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));
    let progress_task = tokio::spawn(async move {
        while let Some(update) = progress_rx.recv().await {
            match update {
                StageProgress::Started { stage } => {
                    spinner.set_message(format!("{} benchmark running...", stage.description()));
                }
                StageProgress::Finished { stage, elapsed } => {
                    spinner.println(format!(
                        "{} benchmark finished in {}",
                        stage.description(),
                        format_duration(elapsed)
                    ));
                }
            }
        }
        spinner.finish_and_clear();
    });

    let report = runner.run_with_progress(progress_tx, cancel_rx).await?;
    progress_task.await.ok();

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&report)
                .map_err(|e| rigmark::RigmarkError::Benchmark(e.to_string()))?
        );
        return Ok(());
    }

    println!();
    println!(
        "CPU: {} kops/s in {}",
        report.compute_score,
        format_duration(report.compute_elapsed)
    );
    println!("{}", report.tier.label());
    println!("RAM: {} MB/s", report.memory_score_mbps);
    println!("Storage: {} MB/s", report.storage_score_mbps);
    println!("Image: {} FPS", report.image_fps);

    Ok(())
}
