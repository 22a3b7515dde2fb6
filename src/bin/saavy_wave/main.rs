//! saavy-wave - arpeggio player with a terminal scope
//!
//! Run with: cargo run -- --waveform square --mode up

mod app;
mod sink;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use app::{DemoSettings, WaveApp};
use saavy_wave::{sequencing::ArpMode, SynthConfig, Waveform};

/// Render the two-arpeggio demo and play it through the default output device
#[derive(Parser)]
#[command(name = "saavy-wave")]
#[command(about = "Waveform + ADSR arpeggio synth with a terminal oscilloscope")]
#[command(version)]
struct Cli {
    /// YAML file with synth settings (sample rate, channels, envelope, smoothing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Oscillator shape: sine, square, sawtooth, triangle
    #[arg(short, long, default_value = "sawtooth")]
    waveform: Waveform,

    /// Arpeggio order: up, down, updown
    #[arg(short, long, default_value = "updown")]
    mode: ArpMode,

    /// Seconds per arpeggio note
    #[arg(short, long, default_value = "0.175")]
    note_duration: f32,

    /// Times each arpeggio pass is repeated
    #[arg(short, long, default_value = "4")]
    repeat: usize,

    /// Play the demo once and exit, without the terminal UI
    #[arg(long)]
    no_ui: bool,
}

fn load_config(path: Option<&PathBuf>) -> EyreResult<SynthConfig> {
    let Some(path) = path else {
        return Ok(SynthConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
    let config: SynthConfig = serde_yaml::from_str(&text)
        .wrap_err_with(|| format!("failed to parse config file {}", path.display()))?;
    config.validate()?;

    tracing::info!(path = %path.display(), "loaded synth config");
    Ok(config)
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    // stderr keeps log lines out of the alternate screen
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    let demo = DemoSettings {
        shape: cli.waveform,
        mode: cli.mode,
        note_duration: cli.note_duration,
        repeat: cli.repeat,
    };

    let app = WaveApp::new(config, demo);
    if cli.no_ui {
        app.play_once()
    } else {
        app.run()
    }
}
