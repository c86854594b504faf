use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "vidmeme", version, about = "Batch-generate vertical video memes")]
struct Cli {
    /// Meme configuration JSON (an array of records).
    #[arg(long, default_value = vidmeme::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory the generated MP4 files are written to.
    #[arg(long, default_value = vidmeme::DEFAULT_OUTPUT_DIR)]
    out_dir: PathBuf,

    /// Seed for file names and audio selection (random when omitted).
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let memes = vidmeme::load_config(&cli.config)
        .with_context(|| format!("failed to load '{}'", cli.config.display()))?;
    tracing::info!(records = memes.len(), config = %cli.config.display(), "loaded configuration");

    if !memes.is_empty() && !vidmeme::ffmpeg_tools_available() {
        anyhow::bail!("ffmpeg and ffprobe must be installed and on PATH");
    }

    let written = match cli.seed {
        Some(seed) => vidmeme::MemeGenerator::with_rng(&cli.out_dir, StdRng::seed_from_u64(seed))?
            .process_batch(&memes)?,
        None => vidmeme::MemeGenerator::new(&cli.out_dir)?.process_batch(&memes)?,
    };

    for path in &written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
