//! chroma - play a color as an FM voice
//!
//! Run with: cargo run -- --swatch blue --model kandinsky

mod audio;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing::info;
use tracing_subscriber::EnvFilter;

use chroma_fm::{
    graph::{write_wav, OfflineHost},
    Color, ModelKey, SynthParams, Swatch, VoiceEngine,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Color model: messiaen or kandinsky
    #[arg(long, default_value_t = ModelKey::Messiaen)]
    model: ModelKey,

    /// Hue in degrees, [0, 360)
    #[arg(long, default_value_t = 0.0)]
    hue: f32,

    /// Lightness, [50, 100]
    #[arg(long, default_value_t = 50.0)]
    lightness: f32,

    /// Named color; overrides --hue and --lightness
    #[arg(long)]
    swatch: Option<Swatch>,

    /// Bounce to a wav file instead of playing
    #[arg(long)]
    wav: Option<PathBuf>,

    /// Sample rate of the wav bounce
    #[arg(long, default_value_t = 48_000)]
    sample_rate: u32,

    /// Print the synth parameters as JSON and exit
    #[arg(long, default_value_t = false)]
    print: bool,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let color = match args.swatch {
        Some(swatch) => swatch.color(),
        None => Color::new(args.hue, args.lightness)?,
    };
    let model = args.model.model();
    let params = model.map(color);

    if args.print {
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    info!(%color, model = model.name, "mapped color");

    match args.wav {
        Some(path) => bounce(&params, &path, args.sample_rate),
        None => audio::play(&params),
    }
}

/// Render one voice offline and write it out.
fn bounce(params: &SynthParams, path: &Path, sample_rate: u32) -> EyreResult<()> {
    let mut engine = VoiceEngine::new(OfflineHost::new(sample_rate as f32));
    engine.init()?;
    engine.play(params)?;

    let seconds = params.duration as f64 + engine.config().dispose_grace;
    let samples = engine.host_mut().render(seconds);
    engine.poll();
    engine.shutdown();

    write_wav(path, &samples, sample_rate)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), seconds, "wrote wav");
    Ok(())
}
