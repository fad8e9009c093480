use anyhow::{bail, Context};
use std::path::PathBuf;
use vector_canvas::draw::persist::load_drawing;
use vector_canvas::logging;
use vector_canvas::settings::CanvasSettings;

const USAGE: &str = "usage: canvas_render <drawing.txt> <out.png> [settings.json]";

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args_os().skip(1);
    let (Some(drawing), Some(output)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };
    let settings_path = args.next().map(PathBuf::from);
    if args.next().is_some() {
        bail!(USAGE);
    }

    let settings = match &settings_path {
        Some(path) => CanvasSettings::load(path)?,
        None => CanvasSettings::default(),
    };
    logging::init(settings.debug_logging, settings.log_file.clone());

    let drawing = PathBuf::from(drawing);
    let output = PathBuf::from(output);
    let mut loaded = load_drawing(&drawing)?;
    if loaded.skipped > 0 {
        tracing::warn!(skipped = loaded.skipped, "some records were skipped");
    }
    loaded.shapes.set_anti_aliasing(settings.anti_aliasing);

    let canvas = loaded
        .shapes
        .render_to_canvas(settings.width, settings.height, &settings.render_settings());
    canvas
        .save_png(&output)
        .with_context(|| format!("render {}", drawing.display()))?;
    Ok(())
}
