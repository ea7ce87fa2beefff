use clap::Parser;
use std::path::PathBuf;

use audiobars::encode::json::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "audiobars", about = "Per-frame frequency bars for audio visualizations")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG)
    pub input: PathBuf,

    /// Output file, or '-' for stdout
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,

    /// Samples per FFT window (power of two); half as many bars are produced
    #[arg(short, long, default_value_t = 128)]
    pub sample_size: usize,

    /// Frames per second of the target video
    #[arg(long, default_value_t = 30.0)]
    pub fps: f64,

    /// Normalization divisor, normally the magnitude of the 16-bit range
    #[arg(long, default_value_t = 32768.0)]
    pub max_int: f64,

    /// Only compute this frame instead of the whole track
    #[arg(long)]
    pub frame: Option<u64>,

    /// Analyze a single channel instead of the mono downmix
    #[arg(long)]
    pub channel: Option<usize>,

    /// Average each frame's bars with its neighbouring frames
    #[arg(long)]
    pub temporal_smoothing: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Jsonl)]
    pub format: OutputFormat,

    /// Config file (defaults to ./audiobars.toml or the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
