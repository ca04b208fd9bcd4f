use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    rc::Rc,
    str::FromStr,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use visbin::{
    Bin, BinOpts, Depth, DepthPreference, FrameOutcome, ManualClock, Palette, PluginRegistry,
    SharedSurface, VideoSurface, Wipe, WipeDir,
};

#[derive(Parser, Debug)]
#[command(name = "visbin", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the registered actors, morphs and inputs.
    List,
    /// Drive a bin for a number of frames and write snapshots as PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Actor connected at frame 0.
    #[arg(long, default_value = "oscilloscope")]
    actor: String,

    /// Audio input.
    #[arg(long, default_value = "sine")]
    input: String,

    /// Bin options JSON; command-line flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Switch to an actor at a frame, as `name@frame`. Repeatable.
    #[arg(long = "switch")]
    switches: Vec<SwitchAt>,

    /// Blend switches with this morph.
    #[arg(long)]
    morph: Option<String>,

    /// Direction of the `wipe` morph (ltr, rtl, ttb, btt).
    #[arg(long, value_parser = parse_wipe_dir)]
    wipe_dir: Option<WipeDir>,

    /// Blend length in milliseconds.
    #[arg(long)]
    morph_ms: Option<u64>,

    /// Depth preference when an actor supports several.
    #[arg(long, value_enum)]
    prefer: Option<PreferChoice>,

    /// Number of frames to run.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Frames per second of the simulated clock.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Destination width.
    #[arg(long, default_value_t = 320)]
    width: u32,

    /// Destination height.
    #[arg(long, default_value_t = 180)]
    height: u32,

    /// Write every n-th frame.
    #[arg(long, default_value_t = 30)]
    every: u64,

    /// Output directory for PNG snapshots.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PreferChoice {
    Lowest,
    Highest,
}

impl From<PreferChoice> for DepthPreference {
    fn from(choice: PreferChoice) -> Self {
        match choice {
            PreferChoice::Lowest => Self::Lowest,
            PreferChoice::Highest => Self::Highest,
        }
    }
}

#[derive(Clone, Debug)]
struct SwitchAt {
    actor: String,
    frame: u64,
}

impl FromStr for SwitchAt {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (actor, frame) = s
            .rsplit_once('@')
            .ok_or_else(|| format!("expected name@frame, got '{s}'"))?;
        if actor.trim().is_empty() {
            return Err(format!("missing actor name in '{s}'"));
        }
        let frame = frame
            .parse()
            .map_err(|_| format!("invalid frame number in '{s}'"))?;
        Ok(Self {
            actor: actor.trim().to_owned(),
            frame,
        })
    }
}

fn parse_wipe_dir(s: &str) -> Result<WipeDir, String> {
    WipeDir::from_name(s).ok_or_else(|| format!("unknown wipe direction '{s}'"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_list() -> anyhow::Result<()> {
    let registry = PluginRegistry::with_builtins();
    println!("actors: {}", registry.actor_names().collect::<Vec<_>>().join(", "));
    println!("morphs: {}", registry.morph_names().collect::<Vec<_>>().join(", "));
    println!("inputs: {}", registry.input_names().collect::<Vec<_>>().join(", "));
    Ok(())
}

fn read_opts_json(path: &Path) -> anyhow::Result<BinOpts> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let opts: BinOpts = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse config '{}'", path.display()))?;
    Ok(opts)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if args.fps == 0 || args.every == 0 {
        anyhow::bail!("--fps and --every must be non-zero");
    }

    let mut opts = match &args.config {
        Some(path) => read_opts_json(path)?,
        None => BinOpts::default(),
    };
    if let Some(morph) = &args.morph {
        opts.morph = Some(morph.clone());
        opts.use_morph = true;
    }
    if let Some(ms) = args.morph_ms {
        opts.morph_duration_ms = ms;
    }
    if let Some(prefer) = args.prefer {
        opts.preferred_depth = prefer.into();
    }

    let mut registry = PluginRegistry::with_builtins();
    if let Some(dir) = args.wipe_dir {
        registry.register_morph("wipe", move || Box::new(Wipe::new(dir)));
    }

    let clock = ManualClock::new();
    let mut bin = Bin::with_opts(registry, &opts)?.with_clock(Rc::new(clock.clone()));
    let main = VideoSurface::with_dimensions(args.width, args.height, Depth::None).shared();
    bin.set_surface(Rc::clone(&main));
    bin.connect_by_name(&args.actor, &args.input)?;
    bin.depth_changed();
    resync(&mut bin, &main)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let frame_time = Duration::from_secs(1) / args.fps;
    let mut written = 0usize;
    for frame in 0..args.frames {
        for switch in args.switches.iter().filter(|s| s.frame == frame) {
            bin.switch_actor(&switch.actor)?;
        }
        if bin.depth_changed() {
            resync(&mut bin, &main)?;
        }

        let outcome = bin.run()?;
        tracing::debug!(frame, ?outcome, "frame done");
        let depth_moved = bin.depth_changed();
        if depth_moved || outcome == FrameOutcome::Switched {
            resync(&mut bin, &main)?;
        }

        if frame % args.every == 0 && outcome != FrameOutcome::Switched {
            let out = args.out_dir.join(format!("frame_{frame:05}.png"));
            if write_png(&main, bin.palette(), &out)? {
                written += 1;
            }
        }
        clock.advance(frame_time);
    }

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

/// Re-layout the destination for the bin's current depth and let the bin catch up.
fn resync(bin: &mut Bin, main: &SharedSurface) -> anyhow::Result<()> {
    {
        let mut s = main.borrow_mut();
        s.set_depth(bin.depth());
        let pitch = s.width() as usize * s.bytes_per_pixel();
        s.set_pitch(pitch);
        s.allocate();
    }
    tracing::info!(depth = %bin.depth(), "destination resynced");
    bin.sync(false)?;
    Ok(())
}

/// Write the destination as RGBA8 PNG. Returns `false` for surfaces without software storage.
fn write_png(main: &SharedSurface, palette: Option<&Palette>, out: &Path) -> anyhow::Result<bool> {
    let s = main.borrow();
    if !s.has_pixels() {
        tracing::info!(depth = %s.depth(), "no software pixels to snapshot");
        return Ok(false);
    }

    let (w, h) = (s.width(), s.height());
    let mut rgba = Vec::with_capacity(w as usize * h as usize * 4);
    for y in 0..h {
        for x in 0..w {
            let [r, g, b] = s.rgb_at(x, y, palette).unwrap_or([0, 0, 0]);
            rgba.extend_from_slice(&[r, g, b, 255]);
        }
    }

    image::save_buffer_with_format(
        out,
        &rgba,
        w,
        h,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(true)
}
