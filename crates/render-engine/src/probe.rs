//! Media probing through ffprobe.

use std::path::Path;
use std::process::{Command, Stdio};

use serde::Deserialize;

/// Basic properties of a source video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaInfo {
    pub width: u32,
    pub height: u32,
    /// Container duration. Zero when ffprobe does not report one.
    pub duration_secs: f64,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    // ffprobe reports numbers as strings here.
    duration: Option<String>,
}

/// Parse ffprobe's JSON output for the first video stream.
pub fn parse_probe_output(raw: &str) -> Option<MediaInfo> {
    let parsed: ProbeOutput = serde_json::from_str(raw).ok()?;
    let stream = parsed.streams.first()?;
    let width = stream.width.filter(|w| *w > 0)?;
    let height = stream.height.filter(|h| *h > 0)?;
    let duration_secs = parsed
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .unwrap_or(0.0);

    Some(MediaInfo {
        width,
        height,
        duration_secs,
    })
}

/// Probe a video file. `None` when ffprobe is missing, fails, or finds no
/// video stream.
pub fn probe_media(ffprobe: &Path, path: &Path) -> Option<MediaInfo> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height:format=duration",
            "-of",
            "json",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| tracing::debug!(ffprobe = %ffprobe.display(), error = %e, "ffprobe not runnable"))
        .ok()?;

    if !output.status.success() {
        tracing::debug!(
            path = %path.display(),
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "ffprobe failed"
        );
        return None;
    }

    let raw = String::from_utf8(output.stdout).ok()?;
    let info = parse_probe_output(&raw);
    tracing::debug!(path = %path.display(), ?info, "Probed media");
    info
}

/// Whether `binary -version` runs and exits successfully.
pub fn command_available(binary: &Path) -> bool {
    Command::new(binary)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
