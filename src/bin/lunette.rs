use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lunette::{EditorCommand, EditorSession, FrameAsset, PhotoFile, RenderOptions, save_png};

#[derive(Parser, Debug)]
#[command(name = "lunette", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a photo behind a frame overlay and write a PNG.
    Compose(ComposeArgs),
    /// Replay a JSON array of editor commands and write the resulting PNG.
    Script(ScriptArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Photo to composite.
    #[arg(long)]
    photo: PathBuf,

    /// Frame overlay image (transparent cutout, drawn last).
    #[arg(long)]
    frame: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Zoom in percent; when omitted the computed default scale is kept.
    #[arg(long, value_parser = clap::value_parser!(u32).range(50..=200))]
    zoom: Option<u32>,

    /// Horizontal pan from the centered position, in canvas pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_x: f64,

    /// Vertical pan from the centered position, in canvas pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_y: f64,
}

#[derive(Parser, Debug)]
struct ScriptArgs {
    /// JSON array of editor commands.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame overlay image.
    #[arg(long)]
    frame: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Script(args) => cmd_script(args),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let frame = FrameAsset::load(&args.frame)?;
    let mut session = EditorSession::new(frame, RenderOptions::default())?;

    let photo = PhotoFile::from_path(&args.photo)?;
    session.load_photo(&photo)?;
    if let Some(zoom) = args.zoom {
        session.apply(&EditorCommand::SetZoom {
            percent: f64::from(zoom),
        })?;
    }

    if args.pan_x != 0.0 || args.pan_y != 0.0 {
        session.apply(&EditorCommand::BeginDrag { x: 0.0, y: 0.0 })?;
        session.apply(&EditorCommand::UpdateDrag {
            x: args.pan_x,
            y: args.pan_y,
            display_scale: 1.0,
        })?;
        session.apply(&EditorCommand::EndDrag)?;
    }

    save_png(session.surface(), &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_script(args: ScriptArgs) -> anyhow::Result<()> {
    let f = File::open(&args.in_path)
        .with_context(|| format!("open script '{}'", args.in_path.display()))?;
    let commands: Vec<EditorCommand> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse command script JSON")?;

    let frame = FrameAsset::load(&args.frame)?;
    let mut session = EditorSession::new(frame, RenderOptions::default())?;
    for command in &commands {
        session.apply(command)?;
    }

    save_png(session.surface(), &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
