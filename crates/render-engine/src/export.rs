//! Render invocation and outcome classification.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use burnin_common::config::RenderSettings;
use burnin_overlay_model::component::OverlayComponent;
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::compositor::{assemble, compile_components};
use crate::filter::RenderProgram;

/// Budget used when none is configured.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(3600);

/// Everything the render step needs besides its inputs. Passed explicitly;
/// the engine reads no ambient state.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// ffmpeg binary, resolved through PATH when relative.
    pub ffmpeg: PathBuf,

    /// Wall-clock limit for one invocation.
    pub time_budget: Duration,

    pub video_codec: String,
    pub preset: String,
    pub crf: u32,

    /// Pass `-y` so an existing output is replaced.
    pub overwrite: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::from(&RenderSettings::default())
    }
}

impl From<&RenderSettings> for RenderConfig {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            ffmpeg: settings.ffmpeg_path.clone(),
            time_budget: Duration::from_secs(settings.time_budget_secs),
            video_codec: settings.video_codec.clone(),
            preset: settings.preset.clone(),
            crf: settings.crf,
            overwrite: settings.overwrite,
        }
    }
}

/// Result of one render attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum RenderOutcome {
    Success(PathBuf),
    Failure(RenderFailure),
}

/// Why a render attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderFailure {
    /// The engine did not finish inside the time budget. Partial output
    /// has been removed.
    #[error("timeout")]
    Timeout { budget_ms: u64 },

    /// The engine exited non-zero. `stderr` is its diagnostic stream,
    /// untouched.
    #[error("{stderr}")]
    Diagnostic { status: Option<i32>, stderr: String },

    /// The engine could not be started or waited on, or the inputs were
    /// unusable before it ran.
    #[error("{message}")]
    Internal { message: String },
}

impl RenderFailure {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Operator-facing reason string.
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Whether re-running the same job could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            RenderFailure::Timeout { .. } | RenderFailure::Internal { .. } => true,
            RenderFailure::Diagnostic { .. } => false,
        }
    }
}

impl RenderOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RenderOutcome::Success(_))
    }

    pub fn output_path(&self) -> Option<&Path> {
        match self {
            RenderOutcome::Success(path) => Some(path),
            RenderOutcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&RenderFailure> {
        match self {
            RenderOutcome::Success(_) => None,
            RenderOutcome::Failure(failure) => Some(failure),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        RenderOutcome::Failure(RenderFailure::internal(message))
    }
}

/// Build the full ffmpeg argument list (without the program name).
pub fn build_ffmpeg_args(
    source: &Path,
    program: &RenderProgram,
    output: &Path,
    config: &RenderConfig,
) -> Vec<String> {
    let mut args = Vec::new();
    if config.overwrite {
        args.push("-y".to_string());
    }
    args.extend(
        ["-hide_banner", "-loglevel", "error", "-nostdin", "-i"]
            .iter()
            .map(|s| s.to_string()),
    );
    args.push(source.to_string_lossy().into_owned());

    match program.filter_graph() {
        None => {
            args.push("-c".to_string());
            args.push("copy".to_string());
        }
        Some(graph) => {
            args.push("-filter_complex".to_string());
            args.push(graph);
            args.extend([
                "-c:v".to_string(),
                config.video_codec.clone(),
                "-preset".to_string(),
                config.preset.clone(),
                "-crf".to_string(),
                config.crf.to_string(),
                "-c:a".to_string(),
                "copy".to_string(),
            ]);
        }
    }

    args.push(output.to_string_lossy().into_owned());
    args
}

/// Run ffmpeg for one program and classify how it ended.
///
/// Waits at most `config.time_budget` for the engine to exit and its
/// diagnostic stream to close. On expiry the child is killed and reaped and
/// the partial output is deleted.
pub async fn render(
    source: &Path,
    program: &RenderProgram,
    output: &Path,
    config: &RenderConfig,
) -> RenderOutcome {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            return RenderOutcome::internal(format!(
                "Failed to create output directory {}: {e}",
                parent.display()
            ));
        }
    }

    let args = build_ffmpeg_args(source, program, output, config);
    tracing::debug!(ffmpeg = %config.ffmpeg.display(), args = ?args, "Running ffmpeg");

    let mut cmd = Command::new(&config.ffmpeg);
    cmd.args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let start = Instant::now();
    let deadline = tokio::time::Instant::from_std(start) + config.time_budget;
    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            return RenderOutcome::internal(format!(
                "Failed to start {}: {e}",
                config.ffmpeg.display()
            ))
        }
    };

    tracing::info!(
        pid = child.id(),
        passthrough = program.is_passthrough(),
        instructions = program.instructions().len(),
        budget_secs = config.time_budget.as_secs_f64(),
        "ffmpeg process started"
    );

    // Drain stderr concurrently so a chatty engine cannot block on a full pipe.
    let stderr_task = child.stderr.take().map(|mut stderr| {
        tokio::spawn(async move {
            let mut buf = Vec::new();
            match stderr.read_to_end(&mut buf).await {
                Ok(_) => String::from_utf8_lossy(&buf).into_owned(),
                Err(err) => format!("<failed to read ffmpeg stderr: {err}>"),
            }
        })
    });

    let waited = tokio::time::timeout_at(deadline, child.wait()).await;
    let status = match waited {
        Err(_) => {
            if let Err(e) = child.kill().await {
                tracing::warn!(error = %e, "Failed to kill timed out ffmpeg");
            }
            if let Some(task) = stderr_task {
                task.abort();
            }
            return timed_out(output, config, start).await;
        }
        Ok(Err(e)) => return RenderOutcome::internal(format!("Failed to wait on ffmpeg: {e}")),
        Ok(Ok(status)) => status,
    };

    // A process the engine left behind can still hold stderr open; the
    // drain shares the same deadline as the wait.
    let stderr = match stderr_task {
        Some(mut task) => match tokio::time::timeout_at(deadline, &mut task).await {
            Ok(joined) => joined.unwrap_or_else(|_| "<failed to join stderr reader>".to_string()),
            Err(_) => {
                task.abort();
                return timed_out(output, config, start).await;
            }
        },
        None => String::new(),
    };
    let elapsed_secs = start.elapsed().as_secs_f64();

    if status.success() {
        tracing::info!(
            elapsed_secs,
            output = %output.display(),
            "ffmpeg finished"
        );
        RenderOutcome::Success(output.to_path_buf())
    } else {
        tracing::warn!(
            elapsed_secs,
            status = ?status.code(),
            stderr = stderr.trim(),
            "ffmpeg failed"
        );
        RenderOutcome::Failure(RenderFailure::Diagnostic {
            status: status.code(),
            stderr,
        })
    }
}

async fn timed_out(output: &Path, config: &RenderConfig, start: Instant) -> RenderOutcome {
    remove_partial_output(output).await;
    tracing::warn!(
        elapsed_secs = start.elapsed().as_secs_f64(),
        budget_secs = config.time_budget.as_secs_f64(),
        "ffmpeg exceeded time budget"
    );
    RenderOutcome::Failure(RenderFailure::Timeout {
        budget_ms: u64::try_from(config.time_budget.as_millis()).unwrap_or(u64::MAX),
    })
}

async fn remove_partial_output(output: &Path) {
    match tokio::fs::remove_file(output).await {
        Ok(()) => tracing::debug!(output = %output.display(), "Removed partial output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(output = %output.display(), error = %e, "Failed to remove partial output")
        }
    }
}

/// A compile-and-render job over one source video.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub source_path: PathBuf,
    pub output_path: PathBuf,

    /// Components in drawing order.
    pub components: Vec<OverlayComponent>,

    pub frame_width: u32,
    pub frame_height: u32,

    /// Closes a trailing unmatched show timestamp.
    pub duration_secs: f64,
}

/// Compile the job's overlays and render them onto the source video.
///
/// This is the main entry point. The source file is never touched beyond
/// being read by the engine.
pub async fn export_overlays(job: &ExportJob, config: &RenderConfig) -> RenderOutcome {
    tracing::info!(
        source = %job.source_path.display(),
        output = %job.output_path.display(),
        components = job.components.len(),
        frame = %format!("{}x{}", job.frame_width, job.frame_height),
        duration_secs = job.duration_secs,
        "Starting overlay export"
    );

    if !job.source_path.is_file() {
        return RenderOutcome::internal(format!(
            "Source video not found: {}",
            job.source_path.display()
        ));
    }

    let compiled = compile_components(&job.components, job.duration_secs);
    let windows: usize = compiled.iter().map(|c| c.windows.len()).sum();
    let program = assemble(compiled.into_iter().map(|c| c.instructions));
    tracing::info!(
        windows,
        instructions = program.instructions().len(),
        passthrough = program.is_passthrough(),
        "Render program assembled"
    );

    let outcome = render(&job.source_path, &program, &job.output_path, config).await;
    if let RenderOutcome::Failure(failure) = &outcome {
        tracing::error!(reason = %failure, retryable = failure.is_retryable(), "Overlay export failed");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use burnin_overlay_model::color::Color;
    use burnin_overlay_model::window::VisibilityWindow;

    use crate::filter::Instruction;

    fn line_program() -> RenderProgram {
        RenderProgram::Filters(vec![Instruction::DrawLine {
            from: (0, 0),
            to: (10, 0),
            color: Color::WHITE,
            thickness: 2,
            window: VisibilityWindow::new(0.0, 1.0),
        }])
    }

    #[test]
    fn test_passthrough_args_copy_streams() {
        let args = build_ffmpeg_args(
            Path::new("in.mp4"),
            &RenderProgram::Passthrough,
            Path::new("out.mp4"),
            &RenderConfig::default(),
        );
        assert_eq!(
            args,
            vec![
                "-y", "-hide_banner", "-loglevel", "error", "-nostdin", "-i", "in.mp4", "-c",
                "copy", "out.mp4"
            ]
        );
        assert!(!args.iter().any(|a| a == "-filter_complex"));
    }

    #[test]
    fn test_filter_args_reencode_video_copy_audio() {
        let config = RenderConfig {
            overwrite: false,
            crf: 23,
            preset: "fast".to_string(),
            ..RenderConfig::default()
        };
        let args = build_ffmpeg_args(
            Path::new("/videos/in.mp4"),
            &line_program(),
            Path::new("/out/job.mp4"),
            &config,
        );

        assert_eq!(args[0], "-hide_banner");
        let graph_pos = args.iter().position(|a| a == "-filter_complex").unwrap();
        assert!(args[graph_pos + 1].starts_with("drawline=x1=0:y1=0:x2=10"));
        let tail: Vec<&str> = args[graph_pos + 2..].iter().map(String::as_str).collect();
        assert_eq!(
            tail,
            vec![
                "-c:v",
                "libx264",
                "-preset",
                "fast",
                "-crf",
                "23",
                "-c:a",
                "copy",
                "/out/job.mp4"
            ]
        );
    }

    #[test]
    fn test_config_from_settings() {
        let settings = RenderSettings {
            ffmpeg_path: PathBuf::from("/opt/ffmpeg/bin/ffmpeg"),
            time_budget_secs: 90,
            ..RenderSettings::default()
        };
        let config = RenderConfig::from(&settings);
        assert_eq!(config.ffmpeg, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(config.time_budget, Duration::from_secs(90));
        assert_eq!(RenderConfig::default().time_budget, DEFAULT_TIME_BUDGET);
    }

    #[test]
    fn test_failure_reasons() {
        assert_eq!(RenderFailure::Timeout { budget_ms: 10 }.reason(), "timeout");
        let diag = RenderFailure::Diagnostic {
            status: Some(1),
            stderr: "No such filter: 'drawline'\n".to_string(),
        };
        assert_eq!(diag.reason(), "No such filter: 'drawline'\n");
        assert!(!diag.is_retryable());
        assert_eq!(RenderFailure::internal("boom").reason(), "boom");
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let success = serde_json::to_value(RenderOutcome::Success(PathBuf::from("/o.mp4"))).unwrap();
        assert_eq!(success["status"], "success");
        assert_eq!(success["detail"], "/o.mp4");

        let failure =
            serde_json::to_value(RenderOutcome::Failure(RenderFailure::Timeout { budget_ms: 200 }))
                .unwrap();
        assert_eq!(failure["status"], "failure");
        assert_eq!(failure["detail"]["kind"], "timeout");
        assert_eq!(failure["detail"]["budget_ms"], 200);
    }

    #[tokio::test]
    async fn test_missing_source_is_internal_failure() {
        let job = ExportJob {
            source_path: PathBuf::from("/nonexistent/burnin/source.mp4"),
            output_path: std::env::temp_dir().join("burnin-unused.mp4"),
            components: Vec::new(),
            frame_width: 1920,
            frame_height: 1080,
            duration_secs: 0.0,
        };
        let outcome = export_overlays(&job, &RenderConfig::default()).await;
        match outcome {
            RenderOutcome::Failure(RenderFailure::Internal { message }) => {
                assert!(message.contains("Source video not found"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
