//! Check that the engine binaries are usable.

use burnin_common::config::{config_file_path, AppConfig};
use burnin_render_engine::probe::command_available;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("burnin System Check");
    println!("{}", "=".repeat(50));

    println!("Config file: {}", config_file_path().display());
    println!("Output dir: {}", config.output_dir.display());
    println!();

    let settings = &config.render;
    let ffmpeg_ok = command_available(&settings.ffmpeg_path);
    if ffmpeg_ok {
        println!("[OK] ffmpeg: {}", settings.ffmpeg_path.display());
    } else {
        println!("[FAIL] ffmpeg: {} (not runnable)", settings.ffmpeg_path.display());
    }

    if command_available(&settings.ffprobe_path) {
        println!("[OK] ffprobe: {}", settings.ffprobe_path.display());
    } else {
        println!(
            "[WARN] ffprobe: {} (not runnable, --probe disabled)",
            settings.ffprobe_path.display()
        );
    }

    println!(
        "     codec {} preset {} crf {}, budget {}s",
        settings.video_codec, settings.preset, settings.crf, settings.time_budget_secs
    );

    println!();
    if ffmpeg_ok {
        println!("burnin is ready.");
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "ffmpeg is required; install it or set render.ffmpeg_path in the config"
        ))
    }
}
