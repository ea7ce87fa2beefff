mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use audiobars::audio::{analysis, decode};
use audiobars::audio::features::AnalysisSettings;
use audiobars::encode::json::{JsonEncoder, OutputFormat};
use cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    if let Some(ref path) = config::find_config(cli.config.clone()) {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            // Merge: config values apply only when CLI is at its default
            if cli.sample_size == config::default_sample_size() {
                cli.sample_size = cfg.analysis.sample_size;
            }
            if cli.max_int == config::default_max_int() {
                cli.max_int = cfg.analysis.max_int;
            }
            if !cli.temporal_smoothing {
                cli.temporal_smoothing = cfg.analysis.temporal_smoothing;
            }
            if cli.channel.is_none() {
                cli.channel = cfg.analysis.channel;
            }
            if cli.fps == config::default_fps() {
                cli.fps = cfg.output.fps;
            }
            if cli.format == OutputFormat::default() {
                cli.format = cfg.output.format;
            }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    if !cli.input.exists() {
        anyhow::bail!("Input file not found: {}", cli.input.display());
    }

    log::info!("audiobars - frequency bars for audio visualizations");
    log::info!("Input: {}", cli.input.display());
    log::info!("Output: {}", cli.output.display());
    log::info!(
        "Window: {} samples -> {} bars @ {}fps",
        cli.sample_size,
        cli.sample_size / 2,
        cli.fps
    );

    // 1. Decode audio
    log::info!("Decoding audio...");
    let audio = decode::decode_audio(&cli.input)?;
    let samples = match cli.channel {
        Some(index) => audio.channel(index)?.to_vec(),
        None => audio.mono(),
    };

    let settings = AnalysisSettings {
        sample_size: cli.sample_size,
        fps: cli.fps,
        max_int: cli.max_int,
        temporal_smoothing: cli.temporal_smoothing,
    };

    // 2. Compute bars
    let frames = match cli.frame {
        Some(frame) => vec![analysis::analyze_frame(&samples, audio.sample_rate, &settings, frame)
            .with_context(|| format!("Failed to visualize frame {}", frame))?],
        None => analysis::analyze(&samples, audio.sample_rate, &settings)
            .context("Failed to analyze audio")?,
    };

    // 3. Write output
    let mut encoder = JsonEncoder::create(&cli.output, cli.format)?;

    let pb = if cli.output.as_os_str() == "-" {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(frames.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames ({eta} remaining)")?
            .progress_chars("=>-"),
    );

    for frame in &frames {
        encoder.write_frame(frame)?;
        pb.inc(1);
    }

    pb.finish_with_message("Writing complete");
    let written = encoder.frames_written();
    encoder.finish()?;

    log::info!("Done! {} frames written to {}", written, cli.output.display());
    Ok(())
}
