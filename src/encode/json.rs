use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::audio::features::FrameBars;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per line
    #[default]
    Jsonl,
    /// A single JSON array of frames
    Json,
}

/// Streams frames to a writer as they are produced.
pub struct JsonEncoder<W: Write> {
    writer: W,
    format: OutputFormat,
    frames_written: u64,
}

impl JsonEncoder<Box<dyn Write>> {
    /// Open `path` for writing; `-` selects stdout.
    pub fn create(path: &Path, format: OutputFormat) -> Result<Self> {
        let writer: Box<dyn Write> = if path.as_os_str() == "-" {
            Box::new(BufWriter::new(std::io::stdout().lock()))
        } else {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        };

        log::info!("Writing {:?} frames to {}", format, path.display());
        Self::new(writer, format)
    }
}

impl<W: Write> JsonEncoder<W> {
    pub fn new(mut writer: W, format: OutputFormat) -> Result<Self> {
        if format == OutputFormat::Json {
            writer.write_all(b"[").context("Failed to write output header")?;
        }
        Ok(Self {
            writer,
            format,
            frames_written: 0,
        })
    }

    pub fn write_frame(&mut self, frame: &FrameBars) -> Result<()> {
        if self.format == OutputFormat::Json && self.frames_written > 0 {
            self.writer.write_all(b",").context("Failed to write frame separator")?;
        }
        serde_json::to_writer(&mut self.writer, frame)
            .with_context(|| format!("Failed to serialize frame {}", frame.frame))?;
        if self.format == OutputFormat::Jsonl {
            self.writer.write_all(b"\n").context("Failed to write frame")?;
        }
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Close the document and flush, handing back the writer.
    pub fn finish(mut self) -> Result<W> {
        if self.format == OutputFormat::Json {
            self.writer.write_all(b"]\n").context("Failed to write output footer")?;
        }
        self.writer.flush().context("Failed to flush output")?;
        log::debug!("Encoder finished after {} frames", self.frames_written);
        Ok(self.writer)
    }
}
