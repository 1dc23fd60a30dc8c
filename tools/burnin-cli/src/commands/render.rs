//! Render a job's overlays onto a video.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use burnin_common::config::AppConfig;
use burnin_render_engine::export::{export_overlays, ExportJob, RenderConfig, RenderOutcome};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{output_path, prepare_job};

#[derive(Debug, Serialize)]
struct RenderReport<'a> {
    job: &'a PathBuf,
    source: &'a PathBuf,
    outcome: &'a RenderOutcome,
    reason: Option<String>,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    elapsed_secs: f64,
}

pub async fn run(
    config: &AppConfig,
    job_path: PathBuf,
    video: PathBuf,
    output: Option<PathBuf>,
    timeout: Option<u64>,
    probe: bool,
    report: Option<PathBuf>,
) -> anyhow::Result<()> {
    println!("Rendering job: {}", job_path.display());

    let prepared = prepare_job(config, &job_path, Some(&video), probe)?;
    let output_path = output_path(config, &prepared, output);

    let mut render_config = RenderConfig::from(&config.render);
    if let Some(secs) = timeout {
        render_config.time_budget = Duration::from_secs(secs);
    }

    println!("  Source: {}", video.display());
    println!("  Output: {}", output_path.display());
    println!("  Components: {}", prepared.components.len());
    println!(
        "  Frame: {}x{}, duration {:.2}s",
        prepared.frame_width, prepared.frame_height, prepared.duration_secs
    );

    let job = ExportJob {
        source_path: video.clone(),
        output_path,
        components: prepared.components,
        frame_width: prepared.frame_width,
        frame_height: prepared.frame_height,
        duration_secs: prepared.duration_secs,
    };

    let started_at = Utc::now();
    let start = Instant::now();
    let outcome = export_overlays(&job, &render_config).await;
    let elapsed_secs = start.elapsed().as_secs_f64();

    if let Some(report_path) = report {
        let report = RenderReport {
            job: &job_path,
            source: &video,
            outcome: &outcome,
            reason: outcome.failure().map(|f| f.reason()),
            started_at,
            finished_at: Utc::now(),
            elapsed_secs,
        };
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&report_path, json)
            .map_err(|e| anyhow::anyhow!("Failed to write report {}: {e}", report_path.display()))?;
        println!("  Report: {}", report_path.display());
    }

    match outcome {
        RenderOutcome::Success(path) => {
            println!("Render complete in {elapsed_secs:.1}s: {}", path.display());
            Ok(())
        }
        RenderOutcome::Failure(failure) => {
            println!("Render failed after {elapsed_secs:.1}s");
            Err(anyhow::anyhow!("Render failed: {}", failure.reason().trim()))
        }
    }
}
