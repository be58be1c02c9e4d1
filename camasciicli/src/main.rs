use clap::{Parser, ValueEnum};
use camascii::config::{DEFAULT_CAMERA, DEFAULT_FONT_SIZE, DEFAULT_GAMMA, RenderConfig};
use camascii::error::{ERROR_END_OF_STREAM, Error};
use camascii::font::FontRasterizer;
use camascii::frames::{FrameIterator, open_camera, open_media_from_path};
use camascii::live::{RenderOptions, Renderer};
use camascii::pipeline::RenderPipeline;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod window_player;

use crate::window_player::WindowPlayer;

/// Command line arguments structure.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Play in a window or export a single rendered frame
    #[arg(value_enum, default_value_t = Action::Play)]
    action: Action,
    /// Render mode: "color" or "b&w"
    #[arg(short = 'c', long = "colortype", default_value = "b&w")]
    color_type: String,
    /// Font em size in pixels, like a point size; the cell size follows from it
    #[arg(short = 'f', long = "fontsize", default_value_t = DEFAULT_FONT_SIZE)]
    font_size: u32,
    /// Gamma applied to every frame before rendering
    #[arg(short, long, default_value_t = DEFAULT_GAMMA)]
    gamma: f64,
    /// Camera device index
    #[arg(short = 'C', long = "cam", default_value_t = DEFAULT_CAMERA)]
    cam: u32,
    /// Monospace font file (defaults to the embedded DejaVu Sans Mono Bold)
    #[arg(long)]
    font: Option<PathBuf>,
    /// Custom glyph ramp, emptiest glyph first
    #[arg(long)]
    char_map: Option<String>,
    /// Image or video file to render instead of the camera
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// File to export to (.txt writes the glyph grid as text)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[clap(rename_all = "lower")]
enum Action {
    Export,
    Play,
}

const WINDOW_TITLE: &str = "ASCII Live feed";

fn main() -> Result<(), Error> {
    let args = Args::parse();
    init_tracing(args.verbose);

    run(args).inspect_err(|e| error!("{e}"))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), Error> {
    let config = RenderConfig {
        mode: args.color_type.parse()?,
        font_size: args.font_size,
        gamma: args.gamma,
        camera: args.cam,
        font_path: args.font.clone(),
        char_map: args.char_map.clone(),
    };
    let pipeline = RenderPipeline::from_config(&config)?;

    let media = match &args.input {
        Some(path) => open_media_from_path(path)?,
        None => open_camera(config.camera)?,
    };

    match args.action {
        Action::Export => export(args, pipeline, media),
        Action::Play => play(pipeline, media),
    }
}

fn export(
    args: Args,
    pipeline: RenderPipeline<FontRasterizer>,
    mut media: FrameIterator,
) -> Result<(), Error> {
    let output = args
        .output
        .ok_or_else(|| Error::Config("export needs --output".to_string()))?;
    let frame = media
        .next()
        .ok_or_else(|| Error::Capture(ERROR_END_OF_STREAM.to_string()))?;
    let (grid, canvas) = pipeline.process_with_grid(frame)?;

    let is_text = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if is_text {
        fs::write(&output, grid.text())?;
    } else {
        canvas.save(&output)?;
    }
    info!(path = %output.display(), rows = grid.rows, cols = grid.cols, "exported frame");
    Ok(())
}

fn play(pipeline: RenderPipeline<FontRasterizer>, media: FrameIterator) -> Result<(), Error> {
    let player = WindowPlayer::open(WINDOW_TITLE)?;
    let render_options = RenderOptions {
        hold_last_frame: media.is_still(),
    };

    let mut renderer = Renderer::new(pipeline, media, render_options);
    renderer.run(player.callback())?;
    Ok(())
}
