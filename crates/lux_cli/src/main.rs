//! LUX - render a Cornell box to a PNG.
//!
//! Usage: `lux [options.json] [output.png]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use lux_scene::{cornell_box, load_options, LuxOptions};
use lux_tracer::ProgressiveRenderer;

const DEFAULT_OUTPUT: &str = "render.png";

/// Split the command line into an optional options file and the output path.
fn parse_args(args: &[String]) -> (Option<PathBuf>, PathBuf) {
    let is_png = |s: &str| s.to_ascii_lowercase().ends_with(".png");

    match args {
        [] => (None, PathBuf::from(DEFAULT_OUTPUT)),
        [only] if is_png(only) => (None, PathBuf::from(only)),
        [options] => (Some(PathBuf::from(options)), PathBuf::from(DEFAULT_OUTPUT)),
        [options, output, ..] => (Some(PathBuf::from(options)), PathBuf::from(output)),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting LUX");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (options_path, output) = parse_args(&args);

    let options = match &options_path {
        Some(path) => load_options(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => LuxOptions::default(),
    };

    let settings = &options.render;
    let mut renderer = ProgressiveRenderer::new(settings.width, settings.height);
    renderer.set_config(settings.render_config())?;
    renderer.set_camera(settings.camera())?;
    renderer.set_scene(cornell_box(&options.scene))?;

    let mut pixels = vec![0u8; renderer.buffer_len()];

    if settings.parallel {
        renderer.render_parallel(&mut pixels)?;
    } else {
        let mut next_report = 0.1;
        renderer.render(&mut pixels, |progress| {
            if progress >= next_report {
                log::info!("Progress: {:.0}%", progress * 100.0);
                while next_report <= progress {
                    next_report += 0.1;
                }
            }
        })?;
    }

    image::save_buffer(
        &output,
        &pixels,
        settings.width,
        settings.height,
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("Failed to save {}", output.display()))?;

    log::info!("Saved {}", output.display());
    Ok(())
}
