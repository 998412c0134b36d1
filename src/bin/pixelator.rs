use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pixelator::{
    CatalogOpts, FrameIndex, GifSink, RenderSession, RenderSessionOpts, Scene, SceneQueue,
    ThemeRegistry,
};

#[derive(Parser, Debug)]
#[command(name = "pixelator", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every queued scene to a GIF.
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Write a scene queue covering every theme permutation.
    Catalog(CatalogArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Scene queue (or single scene) JSON.
    #[arg(long)]
    scenes: PathBuf,

    /// Extra theme registry JSON, merged over the built-in themes.
    #[arg(long)]
    themes: Option<PathBuf>,

    /// Directory receiving one `<scene name>.gif` per scene.
    #[arg(long)]
    out_dir: PathBuf,

    /// Star field seed applied to every scene.
    #[arg(long)]
    seed: Option<u64>,

    /// GIF palette quantizer speed, 1 (best) to 30 (fastest).
    #[arg(long, default_value_t = pixelator::encode::gif::DEFAULT_QUANTIZE_SPEED)]
    quantize_speed: i32,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scene queue (or single scene) JSON.
    #[arg(long)]
    scenes: PathBuf,

    /// Scene to render; defaults to the first queued scene.
    #[arg(long)]
    scene: Option<String>,

    #[arg(long)]
    themes: Option<PathBuf>,

    /// Frame index (0-based). Earlier frames are rendered and discarded.
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    #[arg(long)]
    themes: Option<PathBuf>,

    /// Output scene queue JSON.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Catalog(args) => cmd_catalog(args),
    }
}

fn load_themes(path: Option<&Path>) -> anyhow::Result<ThemeRegistry> {
    let mut themes = ThemeRegistry::builtin();
    if let Some(path) = path {
        let extra = ThemeRegistry::from_path(path)
            .with_context(|| format!("load themes '{}'", path.display()))?;
        themes.extend(extra);
    }
    Ok(themes)
}

fn load_queue(path: &Path) -> anyhow::Result<SceneQueue> {
    SceneQueue::from_path(path).with_context(|| format!("load scenes '{}'", path.display()))
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let themes = load_themes(args.themes.as_deref())?;
    let queue = load_queue(&args.scenes)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for scene in queue.scenes() {
        let out = args.out_dir.join(format!("{}.gif", scene.name()));
        let opts = RenderSessionOpts { seed: args.seed };
        let mut sess = RenderSession::new(scene, &themes, opts)
            .with_context(|| format!("prepare scene '{}'", scene.name()))?;
        // The file is only written once the whole animation has encoded.
        let mut sink = GifSink::new(Vec::new()).with_quantize_speed(args.quantize_speed);
        let stats = sess
            .render_into(&mut sink)
            .with_context(|| format!("render scene '{}'", scene.name()))?;
        let bytes = sink.into_inner()?;
        std::fs::write(&out, bytes).with_context(|| format!("write gif '{}'", out.display()))?;
        tracing::info!(
            scene = scene.name(),
            frames = stats.frames_rendered,
            path = %out.display(),
            "wrote gif"
        );
    }
    Ok(())
}

fn pick_scene<'a>(queue: &'a SceneQueue, name: Option<&str>) -> anyhow::Result<&'a Scene> {
    match name {
        Some(name) => queue
            .get(name)
            .with_context(|| format!("scene '{name}' is not queued")),
        None => queue.scenes().first().context("scene file has no scenes"),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let themes = load_themes(args.themes.as_deref())?;
    let queue = load_queue(&args.scenes)?;
    let scene = pick_scene(&queue, args.scene.as_deref())?;

    let mut sess = RenderSession::new(scene, &themes, RenderSessionOpts { seed: args.seed })?;
    // Stars and ripples are stateful, so every earlier frame has to be stepped through.
    let mut frame = None;
    for t in 0..=args.frame {
        frame = Some(sess.render_frame(FrameIndex(t))?);
    }
    let frame = frame.context("no frame rendered")?.to_rgba();

    ensure_parent(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    tracing::info!(path = %args.out.display(), "wrote frame");
    Ok(())
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let themes = load_themes(args.themes.as_deref())?;
    let defs = pixelator::catalog(&themes, &CatalogOpts::default());
    let count = defs.len();
    let value = SceneQueue::from_defs(defs).to_value()?;

    ensure_parent(&args.out)?;
    let f = std::fs::File::create(&args.out)
        .with_context(|| format!("create '{}'", args.out.display()))?;
    let mut w = std::io::BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &value)
        .with_context(|| format!("write catalog '{}'", args.out.display()))?;
    w.flush()
        .with_context(|| format!("flush catalog '{}'", args.out.display()))?;

    tracing::info!(scenes = count, path = %args.out.display(), "wrote catalog");
    Ok(())
}
