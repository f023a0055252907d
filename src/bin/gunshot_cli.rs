//! Offline harness for the gunshot detector: classify WAV files window by
//! window, or run the detector against the built-in synthetic scenarios.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gunshot_detector::model::BUFFER_SIZE;
use gunshot_detector::{DetectorConfig, Detector};

#[derive(Parser, Debug)]
#[command(
    name = "gunshot_cli",
    about = "Offline harness for the Goertzel + HMM gunshot detector"
)]
struct Cli {
    /// Optional JSON config file overriding detector defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify every 32 000-sample window in a mono 8 kHz 16-bit WAV file.
    Classify {
        #[arg(long)]
        input: PathBuf,
    },
    /// Run the detector over the built-in synthetic scenarios and print the
    /// resulting counts and decisions.
    SelfTest,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => DetectorConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => DetectorConfig::default(),
    };

    match cli.command {
        Commands::Classify { input } => classify_wav(&input, config),
        Commands::SelfTest => self_test(config),
    }
}

fn classify_wav(path: &PathBuf, config: DetectorConfig) -> Result<ExitCode> {
    let mut reader =
        hound::WavReader::open(path).with_context(|| format!("opening {}", path.display()))?;
    let spec = reader.spec();
    if spec.channels != 1 || spec.sample_rate != 8000 || spec.bits_per_sample != 16 {
        anyhow::bail!(
            "expected mono 8 kHz 16-bit PCM, got {} channel(s) at {} Hz / {} bits",
            spec.channels,
            spec.sample_rate,
            spec.bits_per_sample
        );
    }

    let samples: Vec<i16> = reader
        .samples::<i16>()
        .collect::<Result<_, _>>()
        .context("reading samples")?;

    let mut detector = Detector::new(config);
    let window_samples = BUFFER_SIZE * 2;
    let window_count = samples.len().div_ceil(window_samples);

    for (index, chunk) in samples.chunks(window_samples).enumerate() {
        let mut buf1 = [0i16; BUFFER_SIZE];
        let mut buf2 = [0i16; BUFFER_SIZE];
        for (i, &sample) in chunk.iter().take(BUFFER_SIZE).enumerate() {
            buf1[i] = sample;
        }
        for (i, &sample) in chunk.iter().skip(BUFFER_SIZE).enumerate() {
            buf2[i] = sample;
        }

        let outcome = detector.classify(&buf1, &buf2);
        println!(
            "window {index}/{window_count} offset={} count={} detected={}",
            index * window_samples,
            outcome.count,
            outcome.detected
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn self_test(config: DetectorConfig) -> Result<ExitCode> {
    let mut detector = Detector::new(config);

    let scenarios: [(&str, ([i16; BUFFER_SIZE], [i16; BUFFER_SIZE])); 4] = [
        ("silence", gunshot_detector::fixtures::silence()),
        ("full_scale_dc", gunshot_detector::fixtures::full_scale_dc()),
        (
            "synthetic_impulse",
            gunshot_detector::fixtures::synthetic_impulse(42),
        ),
        (
            "sustained_tone_1300hz",
            gunshot_detector::fixtures::sustained_tone(1300.0, 7),
        ),
    ];

    for (name, (buf1, buf2)) in scenarios {
        let outcome = detector.classify(&buf1, &buf2);
        println!(
            "{name}: count={} detected={}",
            outcome.count, outcome.detected
        );
    }

    Ok(ExitCode::SUCCESS)
}
