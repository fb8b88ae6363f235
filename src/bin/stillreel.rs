use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use stillreel::{
    AnimationKind, BackgroundSpec, Canvas, FrameIndex, JobReport, MediaSource, RenderJob,
    RenderOptions, UploadConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stillreel", version, about = "Animate a still image into a short MP4")]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. `debug`, `stillreel=trace`).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Run a JSON job file.
    Job(JobArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// List the available animations.
    List,
}

#[derive(clap::Args, Debug)]
struct CanvasArgs {
    /// Output width in pixels (even).
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Output height in pixels (even).
    #[arg(long, requires = "width")]
    height: Option<u32>,
}

impl CanvasArgs {
    fn canvas(&self) -> anyhow::Result<Option<Canvas>> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Ok(Some(Canvas::new(w, h)?)),
            _ => Ok(None),
        }
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Source image, path or http(s) URL.
    #[arg(long)]
    image: String,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Animation to run.
    #[arg(long, default_value_t = AnimationKind::default())]
    animation: AnimationKind,

    /// Frames per second (program default when omitted).
    #[arg(long)]
    fps: Option<u32>,

    /// Audio track to mux in, path or URL.
    #[arg(long)]
    audio: Option<String>,

    /// Background image, path or URL (program default background when omitted).
    #[arg(long)]
    background_image: Option<String>,

    /// Particle RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the cinematic copy.
    #[arg(long)]
    no_cinematic: bool,

    /// Report the duration read back by ffprobe.
    #[arg(long)]
    probe_duration: bool,

    /// Upload endpoint URL.
    #[arg(long, requires = "upload_preset")]
    upload_endpoint: Option<String>,

    /// Upload preset name.
    #[arg(long, requires = "upload_endpoint")]
    upload_preset: Option<String>,

    /// Keep the local MP4 after uploading.
    #[arg(long)]
    keep_local: bool,

    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Parser, Debug)]
struct JobArgs {
    /// Job JSON file.
    job: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Source image, path or http(s) URL.
    #[arg(long)]
    image: String,

    /// Animation to sample.
    #[arg(long, default_value_t = AnimationKind::default())]
    animation: AnimationKind,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Frames per second (program default when omitted).
    #[arg(long)]
    fps: Option<u32>,

    /// Particle RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    canvas: CanvasArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Job(args) => cmd_job(args),
        Command::Frame(args) => cmd_frame(args),
        Command::List => cmd_list(),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut job = RenderJob::new(MediaSource::parse(&args.image), args.animation, args.out);
    job.fps = args.fps;
    job.audio = args.audio.as_deref().map(MediaSource::parse);
    job.background = args
        .background_image
        .as_deref()
        .map(|s| BackgroundSpec::Image(MediaSource::parse(s)));
    job.canvas = args.canvas.canvas()?;
    job.seed = args.seed;
    job.cinematic = !args.no_cinematic;
    job.probe_duration = args.probe_duration;
    job.upload = match (args.upload_endpoint, args.upload_preset) {
        (Some(endpoint), Some(preset)) => Some(UploadConfig::new(endpoint, preset)),
        _ => None,
    };
    job.keep_local = args.keep_local;
    run(&job)
}

fn cmd_job(args: JobArgs) -> anyhow::Result<()> {
    let job = RenderJob::from_path(&args.job)?;
    run(&job)
}

fn run(job: &RenderJob) -> anyhow::Result<()> {
    let report = stillreel::run_job(job)?;
    print_report(&report)?;
    if let Some(out) = &report.output {
        eprintln!("wrote {}", out.display());
    }
    if let Some(path) = &report.cinematic_path {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn print_report(report: &JobReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize job report")?;
    println!("{json}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let source = stillreel::load_image(&MediaSource::parse(&args.image))?;
    let opts = RenderOptions {
        fps: args.fps.map(stillreel::Fps::whole).transpose()?,
        canvas: args.canvas.canvas()?.unwrap_or_default(),
        seed: args.seed,
        ..RenderOptions::default()
    };
    let frame = stillreel::render_frame(args.animation, &source, &opts, FrameIndex(args.frame))?;

    stillreel::encode::ffmpeg::ensure_parent_dir(&args.out)?;
    frame
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_list() -> anyhow::Result<()> {
    for kind in AnimationKind::ALL {
        let fade = if kind.cinematic().is_some() {
            " +cinematic"
        } else {
            ""
        };
        println!(
            "{:<26} {:>2} fps  {}{}",
            kind.name(),
            kind.default_fps(),
            kind.summary(),
            fade
        );
    }
    Ok(())
}
