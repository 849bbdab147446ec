use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "photoframe", version, about = "Frame a photo under a logo overlay and export a PNG")]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config JSON. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose one photo with the overlay and write the PNG.
    Export(ExportArgs),
    /// Replay a recorded editing session from a JSON script.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Photo to frame (PNG, JPEG, ...).
    #[arg(long)]
    photo: PathBuf,

    /// Overlay PNG; overrides the config.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Zoom factor, bounded by the configured slider range.
    #[arg(long, default_value_t = photoframe::RESET_ZOOM)]
    zoom: f64,

    /// Horizontal shift from the centered position, in pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    offset_x: f64,

    /// Vertical shift from the centered position, in pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    offset_y: f64,

    /// Output PNG path. Defaults to the configured export file name.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Session script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Directory downloads are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also save the final preview surface as PNG.
    #[arg(long)]
    preview: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;
    photoframe::init_logging(&cfg.logging, cli.verbose)?;

    match cli.cmd {
        Command::Export(args) => cmd_export(cfg, args),
        Command::Replay(args) => cmd_replay(cfg, args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<photoframe::PhotoFrameConfig> {
    match path {
        Some(p) => photoframe::PhotoFrameConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(photoframe::PhotoFrameConfig::default()),
    }
}

fn cmd_export(mut cfg: photoframe::PhotoFrameConfig, args: ExportArgs) -> anyhow::Result<()> {
    if args.overlay.is_some() {
        cfg.overlay = args.overlay.clone();
    }

    let mut editor = photoframe::Editor::from_config(&cfg)?;
    let photo = std::fs::read(&args.photo)
        .with_context(|| format!("read photo '{}'", args.photo.display()))?;
    editor
        .load_subject_bytes(&photo)
        .with_context(|| format!("decode photo '{}'", args.photo.display()))?;

    editor.zoom_input(args.zoom)?;
    if args.offset_x != 0.0 || args.offset_y != 0.0 {
        // Offsets arrive as one synthetic drag from the origin.
        editor.pointer_down(photoframe::Point::ORIGIN);
        editor.pointer_move(photoframe::Point::new(args.offset_x, args.offset_y))?;
        editor.pointer_up();
    }

    let photoframe::Outcome::Downloaded(download) = editor.download()? else {
        anyhow::bail!("export produced no image (bug)");
    };

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(&download.file_name));
    write_bytes(&out, &download.png)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_replay(cfg: photoframe::PhotoFrameConfig, args: ReplayArgs) -> anyhow::Result<()> {
    let script = photoframe::Script::from_path(&args.script)?;
    let base_dir = args.script.parent().unwrap_or_else(|| Path::new("."));

    let mut editor = photoframe::Editor::from_config(&cfg)?;
    let report = photoframe::replay(&mut editor, &script, base_dir)?;

    for n in &report.notifications {
        eprintln!("notice: {}", n.message);
    }
    for d in &report.downloads {
        let out = args.out_dir.join(&d.file_name);
        write_bytes(&out, &d.png)?;
        eprintln!("wrote {}", out.display());
    }

    if let Some(path) = &args.preview {
        let png = photoframe::encode_png(editor.preview())?;
        write_bytes(path, &png)?;
        eprintln!("wrote {}", path.display());
    }

    tracing::info!(
        steps = script.steps.len(),
        renders = report.renders,
        downloads = report.downloads.len(),
        "replay finished"
    );
    Ok(())
}

fn write_bytes(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))
}
