use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use slidecast::{
    ContentCategory, FfmpegAudioDecoder, MusicLibrary, RenderConfig, RenderContext, RenderJob,
    Caption, SeededDirections, SkippedImage, SlidePlan, SlideSource, captions_from_script,
    plan_slides, render_to_file,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slidecast", version)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a narrated slideshow MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the slide timeline as JSON without decoding audio or encoding.
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
struct SlideArgs {
    /// Slide image, in display order. Repeat for each slide.
    #[arg(long = "image", required = true)]
    images: Vec<PathBuf>,

    /// Content category selecting the background gradient.
    #[arg(long, default_value = "default")]
    category: String,

    /// JSON render config; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for zoom directions and music selection (defaults to the clock).
    #[arg(long)]
    seed: Option<u64>,

    /// Output width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Output frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Ken Burns zoom amount.
    #[arg(long)]
    zoom_ratio: Option<f64>,

    /// Crossfade length in seconds.
    #[arg(long)]
    fade: Option<f64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    slides: SlideArgs,

    /// Narration audio; its length sets the video length.
    #[arg(long)]
    narration: PathBuf,

    /// Music bed file.
    #[arg(long, conflicts_with = "music_dir")]
    music: Option<PathBuf>,

    /// Directory to pick a music bed (.mp3/.wav) from.
    #[arg(long)]
    music_dir: Option<PathBuf>,

    /// Music bed gain.
    #[arg(long)]
    music_gain: Option<f32>,

    /// Render without a music bed.
    #[arg(long, default_value_t = false)]
    no_music: bool,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    slides: SlideArgs,

    /// Narration length in seconds.
    #[arg(long)]
    duration: f64,

    /// Narration script text file; adds timed caption lines to the plan.
    #[arg(long)]
    script: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct PlanOutput {
    duration_secs: f64,
    config: RenderConfig,
    slides: Vec<SlidePlan>,
    skipped_images: Vec<SkippedImage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    captions: Vec<Caption>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(args: &SlideArgs) -> anyhow::Result<RenderConfig> {
    let mut cfg = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)?,
        None => RenderConfig::default(),
    };
    if let Some(w) = args.width {
        cfg.canvas.width = w;
    }
    if let Some(h) = args.height {
        cfg.canvas.height = h;
    }
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    if let Some(z) = args.zoom_ratio {
        cfg.zoom_ratio = z;
    }
    if let Some(f) = args.fade {
        cfg.fade_secs = f;
    }
    Ok(cfg)
}

fn seeded(seed: Option<u64>) -> SeededDirections {
    match seed {
        Some(seed) => SeededDirections::new(seed),
        None => SeededDirections::from_clock(),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.slides)?;
    if let Some(g) = args.music_gain {
        cfg.music_gain = g;
    }
    if args.no_music {
        cfg.music_enabled = false;
    }
    let directions = seeded(args.slides.seed);

    let music = match (args.music, args.music_dir) {
        (Some(path), _) => Some(path),
        (None, Some(dir)) => MusicLibrary::new(dir).pick(directions.seed),
        (None, None) => None,
    };

    let mut job = RenderJob::new(args.narration, args.slides.images, &args.out)
        .with_category(ContentCategory::from_tag(&args.slides.category));
    job.music = music;

    let decoder = FfmpegAudioDecoder;
    let ctx = RenderContext::new(&decoder, &directions);
    let report = render_to_file(&job, &cfg, &ctx)
        .with_context(|| format!("render '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {:.2}s, {} slides, {} skipped)",
        args.out.display(),
        report.frames,
        report.duration_secs,
        report.slides.len(),
        report.skipped_images.len()
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.slides)?;
    cfg.validate()?;
    let directions = seeded(args.slides.seed);

    let mut sources = Vec::with_capacity(args.slides.images.len());
    let mut skipped_images = Vec::new();
    for (index, path) in args.slides.images.iter().enumerate() {
        match image::image_dimensions(path) {
            Ok((width, height)) => sources.push(SlideSource {
                path: path.clone(),
                width,
                height,
            }),
            Err(e) => {
                tracing::warn!(index, path = %path.display(), error = %e, "skipping unreadable slide image");
                skipped_images.push(SkippedImage {
                    index,
                    source: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    if sources.is_empty() {
        return Err(slidecast::SlidecastError::no_valid_input(
            "none of the slide images could be read",
        )
        .into());
    }

    let slides = plan_slides(args.duration, &sources, &cfg, &directions)?;
    let captions = match &args.script {
        Some(path) => {
            let script = std::fs::read_to_string(path)
                .with_context(|| format!("read script '{}'", path.display()))?;
            captions_from_script(&script, args.duration)
        }
        None => Vec::new(),
    };
    let out = PlanOutput {
        duration_secs: args.duration,
        config: cfg,
        slides,
        skipped_images,
        captions,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
