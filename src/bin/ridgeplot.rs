use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ridgeplot", version, about = "Seeded ridge-plot SVG generator")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one drawing as SVG.
    Generate(GenerateArgs),
    /// Print the default configuration as JSON.
    Defaults,
    /// Persist a `{ "svg": ..., "seed": ... }` save payload into a directory.
    Save(SaveArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Configuration JSON; missing fields use the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas preset (portrait-600, portrait-900, portrait-1200).
    #[arg(long)]
    preset: Option<String>,

    /// Canvas width.
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height.
    #[arg(long)]
    height: Option<f64>,

    /// Number of rows.
    #[arg(long)]
    rows: Option<u32>,

    /// Spacing between row baselines.
    #[arg(long)]
    spacing: Option<f64>,

    /// Peak-width scale (lower = sharper peaks).
    #[arg(long)]
    sigma: Option<f64>,

    /// Maximum peak height.
    #[arg(long)]
    amplitude: Option<f64>,

    /// Noise level.
    #[arg(long)]
    noise: Option<f64>,

    /// Stroke width.
    #[arg(long)]
    stroke: Option<f64>,

    /// Random seed.
    #[arg(long, conflicts_with = "random_seed")]
    seed: Option<u64>,

    /// Draw a fresh seed from OS entropy (reported on stderr).
    #[arg(long)]
    random_seed: bool,

    /// Use layered harmonic waves with this base frequency instead of classic waves + noise.
    #[arg(long)]
    layered: Option<f64>,

    /// Give every row its own random substream.
    #[arg(long)]
    per_row_streams: bool,

    /// Synthesize rows in parallel (implies --per-row-streams).
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel.
    #[arg(long)]
    threads: Option<usize>,

    /// Output SVG path, or `-` for stdout.
    #[arg(long, default_value = "ridgeplot.svg", conflicts_with = "save_dir")]
    out: PathBuf,

    /// Save into this directory as `ridgeplot_seed<seed>_<timestamp>.svg` instead of --out.
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Parse the output back with usvg before writing.
    #[arg(long)]
    verify: bool,
}

#[derive(Parser, Debug)]
struct SaveArgs {
    /// Payload JSON file.
    #[arg(long)]
    payload: PathBuf,

    /// Target directory.
    #[arg(long, default_value = "saved_svgs")]
    dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Defaults => cmd_defaults(),
        Command::Save(args) => cmd_save(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_config(args: &GenerateArgs) -> anyhow::Result<ridgeplot::Configuration> {
    let mut config = match &args.config {
        Some(path) => ridgeplot::Configuration::from_path(path)
            .with_context(|| format!("load configuration '{}'", path.display()))?,
        None => ridgeplot::Configuration::default(),
    };

    if let Some(name) = &args.preset {
        ridgeplot::CanvasPreset::from_name(name)?.apply(&mut config);
    }
    if let Some(v) = args.width {
        config.width = v;
    }
    if let Some(v) = args.height {
        config.height = v;
    }
    if let Some(v) = args.rows {
        config.row_count = v;
    }
    if let Some(v) = args.spacing {
        config.row_spacing = v;
    }
    if let Some(v) = args.sigma {
        config.sigma = v;
    }
    if let Some(v) = args.amplitude {
        config.max_amplitude = v;
    }
    if let Some(v) = args.noise {
        config.noise_level = v;
    }
    if let Some(v) = args.stroke {
        config.stroke_width = v;
    }
    if let Some(base_frequency) = args.layered {
        config.waves = ridgeplot::WaveStyle::Layered { base_frequency };
    }
    if args.random_seed {
        config.seed = None;
    } else if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    config.validate()?;
    Ok(config)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    let opts = ridgeplot::GenerateOpts {
        stream: if args.per_row_streams || args.parallel {
            ridgeplot::StreamMode::PerRow
        } else {
            ridgeplot::StreamMode::Shared
        },
        parallel: args.parallel,
        threads: args.threads,
    };

    let doc = ridgeplot::generate_with_opts(&config, &opts)?;
    let markup = ridgeplot::serialize(&doc);

    if args.verify {
        let tree = ridgeplot::parse_markup(&markup)?;
        let paths = ridgeplot::count_path_nodes(tree.root());
        anyhow::ensure!(
            paths == doc.element_count(),
            "read-back found {paths} paths, expected {}",
            doc.element_count()
        );
    }

    let location = if let Some(dir) = &args.save_dir {
        let mut sink = ridgeplot::DirSink::new(dir);
        let receipt = ridgeplot::DocumentSink::save(
            &mut sink,
            &ridgeplot::SaveRequest {
                markup: &markup,
                label: doc.seed.to_string(),
                timestamp: chrono::Local::now().naive_local(),
            },
        )?;
        receipt.location
    } else if args.out == Path::new("-") {
        std::io::stdout()
            .lock()
            .write_all(markup.as_bytes())
            .context("write svg to stdout")?;
        "stdout".to_string()
    } else {
        let mut sink = ridgeplot::FileSink::new(&args.out);
        let receipt = ridgeplot::DocumentSink::save(
            &mut sink,
            &ridgeplot::SaveRequest {
                markup: &markup,
                label: doc.seed.to_string(),
                timestamp: chrono::Local::now().naive_local(),
            },
        )?;
        receipt.location
    };

    eprintln!(
        "wrote {location} (seed {}, {} rows, {}x{}, fingerprint {:016x})",
        doc.seed,
        doc.row_count(),
        doc.canvas.width,
        doc.canvas.height,
        ridgeplot::fingerprint(&markup)
    );
    Ok(())
}

fn cmd_defaults() -> anyhow::Result<()> {
    let json = ridgeplot::Configuration::default().to_json_pretty()?;
    println!("{json}");
    Ok(())
}

fn cmd_save(args: SaveArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.payload)
        .with_context(|| format!("read payload '{}'", args.payload.display()))?;
    let payload = ridgeplot::SavePayload::from_json_str(&text)?;

    let mut sink = ridgeplot::DirSink::new(&args.dir);
    let receipt = ridgeplot::DocumentSink::save(
        &mut sink,
        &payload.request(chrono::Local::now().naive_local()),
    )?;

    let response = ridgeplot::SaveResponse {
        success: true,
        filename: receipt.location,
    };
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
