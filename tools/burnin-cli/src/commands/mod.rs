pub mod check;
pub mod plan;
pub mod render;

use std::path::{Path, PathBuf};

use burnin_common::config::AppConfig;
use burnin_overlay_model::component::OverlayComponent;
use burnin_overlay_model::job::JobDocument;
use burnin_render_engine::probe::probe_media;

/// A job document loaded and normalized for one source video.
pub struct PreparedJob {
    pub job_id: String,
    pub components: Vec<OverlayComponent>,
    pub frame_width: u32,
    pub frame_height: u32,
    pub duration_secs: f64,
}

/// Load the job document and, when asked, fill missing frame size or
/// duration from the source video.
pub fn prepare_job(
    config: &AppConfig,
    job_path: &Path,
    video: Option<&Path>,
    probe: bool,
) -> anyhow::Result<PreparedJob> {
    let document = JobDocument::from_path(job_path)
        .map_err(|e| anyhow::anyhow!("Failed to load job: {e}"))?;

    let mut frame_width = document.frame_width();
    let mut frame_height = document.frame_height();
    let mut duration_secs = document.duration_secs();

    if let (true, Some(video)) = (probe, video) {
        match probe_media(&config.render.ffprobe_path, video) {
            Some(info) => {
                if !document.has_frame_size() {
                    frame_width = info.width;
                    frame_height = info.height;
                }
                if duration_secs <= 0.0 {
                    duration_secs = info.duration_secs;
                }
            }
            None => tracing::warn!(video = %video.display(), "Could not probe source video"),
        }
    }

    let job_id = job_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "job".to_string());

    Ok(PreparedJob {
        job_id,
        components: document.components(),
        frame_width,
        frame_height,
        duration_secs,
    })
}

pub fn output_path(config: &AppConfig, job: &PreparedJob, output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| config.output_path_for(&job.job_id))
}
