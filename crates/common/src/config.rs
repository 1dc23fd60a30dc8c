//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BurninError, BurninResult};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where rendered videos are written by default.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// External engine settings.
    #[serde(default)]
    pub render: RenderSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the external rendering engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// ffmpeg binary (name resolved through PATH, or an absolute path).
    pub ffmpeg_path: PathBuf,

    /// ffprobe binary used for media probing.
    pub ffprobe_path: PathBuf,

    /// Wall-clock budget for a single render invocation.
    pub time_budget_secs: u64,

    /// Video encoder used when overlays force a re-encode.
    pub video_codec: String,

    /// Encoder preset.
    pub preset: String,

    /// Constant rate factor.
    pub crf: u32,

    /// Overwrite an existing output file.
    pub overwrite: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "burnin_render_engine=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            render: RenderSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            time_budget_secs: 3600,
            video_codec: "libx264".to_string(),
            preset: "slow".to_string(),
            crf: 18,
            overwrite: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %config_path.display(), error = %e, "Ignoring config file");
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path. Unlike [`AppConfig::load`], any
    /// failure is reported.
    pub fn load_from(path: impl AsRef<Path>) -> BurninResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BurninError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| BurninError::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Default output location for a job: `<output_dir>/<job_id>.mp4`.
    pub fn output_path_for(&self, job_id: &str) -> PathBuf {
        self.output_dir.join(format!("{job_id}.mp4"))
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("burnin").join("config.json")
}

fn default_output_dir() -> PathBuf {
    std::env::temp_dir().join("burnin-outputs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults_match_documented_values() {
        let settings = RenderSettings::default();
        assert_eq!(settings.time_budget_secs, 3600);
        assert_eq!(settings.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert_eq!(settings.video_codec, "libx264");
        assert_eq!(settings.crf, 18);
        assert!(settings.overwrite);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let raw = r#"{ "render": { "time_budget_secs": 120 } }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.render.time_budget_secs, 120);
        assert_eq!(config.render.preset, "slow");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.output_dir, default_output_dir());
    }

    #[test]
    fn test_partial_logging_section_fills_defaults() {
        let path = std::env::temp_dir().join(format!(
            "burnin_test_partial_logging_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "logging": { "level": "debug" } }"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.json);
        assert!(config.logging.file.is_none());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_output_path_for_job() {
        let config = AppConfig {
            output_dir: PathBuf::from("/srv/out"),
            ..AppConfig::default()
        };
        assert_eq!(
            config.output_path_for("job-42"),
            PathBuf::from("/srv/out/job-42.mp4")
        );
    }

    #[test]
    fn test_load_from_reports_parse_failure() {
        let path = std::env::temp_dir().join("burnin_test_bad_config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, BurninError::Config { .. }));

        std::fs::remove_file(&path).ok();
    }
}
