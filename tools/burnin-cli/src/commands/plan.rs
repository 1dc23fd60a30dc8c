//! Dry run: show windows, the compiled program and the ffmpeg command.

use std::path::PathBuf;

use burnin_common::config::AppConfig;
use burnin_render_engine::compositor::{assemble, compile_components};
use burnin_render_engine::export::{build_ffmpeg_args, RenderConfig};
use burnin_render_engine::filter::enable_expr;

use super::{output_path, prepare_job};

pub fn run(
    config: &AppConfig,
    job_path: PathBuf,
    video: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let prepared = prepare_job(config, &job_path, video.as_deref(), video.is_some())?;
    let output_path = output_path(config, &prepared, output);

    println!("Job: {} ({})", prepared.job_id, job_path.display());
    println!(
        "  Frame: {}x{}, duration {:.2}s",
        prepared.frame_width, prepared.frame_height, prepared.duration_secs
    );
    println!();

    let compiled = compile_components(&prepared.components, prepared.duration_secs);

    println!("Components:");
    for component in &compiled {
        let windows: Vec<String> = component.windows.iter().map(enable_expr).collect();
        println!(
            "  {} [{}] windows: {} -> {} instruction(s)",
            component.id,
            component.variant,
            if windows.is_empty() {
                "none".to_string()
            } else {
                windows.join(" ")
            },
            component.instructions.len()
        );
    }
    println!();

    let program = assemble(compiled.into_iter().map(|c| c.instructions));
    if program.is_passthrough() {
        println!("Program: pass-through (streams copied unmodified)");
    } else {
        println!("Program ({} instructions):", program.instructions().len());
        for (idx, instruction) in program.instructions().iter().enumerate() {
            println!("  {:>3}. {instruction}", idx + 1);
        }
    }
    println!();

    let render_config = RenderConfig::from(&config.render);
    let source = video.unwrap_or_else(|| PathBuf::from("<video>"));
    let args = build_ffmpeg_args(&source, &program, &output_path, &render_config);
    println!("Command:");
    println!("  {} {}", render_config.ffmpeg.display(), args.join(" "));

    Ok(())
}
