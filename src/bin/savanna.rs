use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "savanna", version, about = savanna::SYNOPSIS)]
struct Cli {
    /// Log playback and encoder activity to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single instant of the story as a PNG.
    Frame(FrameArgs),
    /// Render whole loops to an MP4 (requires `ffmpeg` on PATH) or a PNG sequence.
    Render(RenderArgs),
    /// Print the scene timetable as JSON.
    Scenes,
}

#[derive(Args, Debug)]
struct RasterArgs {
    /// Pixel density relative to the 960x540 canvas.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Elapsed story time in seconds; wraps past the end of the loop.
    #[arg(long, short)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    raster: RasterArgs,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Output MP4 path. Ignored when `--png-dir` is given.
    #[arg(long, required_unless_present = "png_dir")]
    out: Option<PathBuf>,

    /// Write numbered PNG frames into this directory instead of an MP4.
    #[arg(long)]
    png_dir: Option<PathBuf>,

    /// Frames per second, as `N` or `N/D`.
    #[arg(long, default_value = "30", value_parser = parse_fps)]
    fps: savanna::Fps,

    /// Number of full loops.
    #[arg(long, default_value_t = 1)]
    loops: u32,

    #[command(flatten)]
    raster: RasterArgs,

    /// Render frames on a worker pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel batch.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Write the caption cues as JSON to this path.
    #[arg(long)]
    captions: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Scenes => cmd_scenes(),
    }
}

fn parse_fps(s: &str) -> Result<savanna::Fps, String> {
    let (num, den) = match s.split_once('/') {
        Some((n, d)) => (n.trim(), d.trim()),
        None => (s.trim(), "1"),
    };
    let num: u32 = num.parse().map_err(|e| format!("invalid fps numerator: {e}"))?;
    let den: u32 = den
        .parse()
        .map_err(|e| format!("invalid fps denominator: {e}"))?;
    savanna::Fps::new(num, den).map_err(|e| e.to_string())
}

fn settings(raster: &RasterArgs) -> savanna::RenderSettings {
    savanna::RenderSettings {
        scale: raster.scale,
        ..Default::default()
    }
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let frame = savanna::render_still(args.time, &settings(&args.raster))?;
    ensure_parent(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    let scene = savanna::resolve_scene(savanna::wrap_seconds(args.time));
    eprintln!("wrote {} ({})", args.out.display(), scene.label);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let opts = savanna::LoopRenderOpts {
        fps: args.fps,
        loops: args.loops,
        settings: settings(&args.raster),
        parallel: args.parallel,
        threads: args.threads,
        chunk_size: args.chunk_size,
    };

    let (result, target) = match (&args.png_dir, &args.out) {
        (Some(dir), _) => {
            let mut sink = savanna::PngSequenceSink::new(dir);
            (savanna::render_loop(&opts, &mut sink)?, dir.clone())
        }
        (None, Some(out)) => {
            let mut sink = savanna::FfmpegSink::new(savanna::FfmpegSinkOpts::new(out));
            (savanna::render_loop(&opts, &mut sink)?, out.clone())
        }
        (None, None) => anyhow::bail!("either --out or --png-dir is required"),
    };

    if let Some(path) = &args.captions {
        ensure_parent(path)?;
        std::fs::write(path, result.captions_json()?)
            .with_context(|| format!("write captions '{}'", path.display()))?;
    }

    eprintln!(
        "wrote {} ({} frames, {}x{})",
        target.display(),
        result.stats.frames_total,
        result.stats.width,
        result.stats.height
    );
    Ok(())
}

fn cmd_scenes() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&savanna::SCENES).context("serialize scenes")?;
    println!("{json}");
    Ok(())
}
