/// Sample range analyzed for one output frame, centered on the playback position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleWindow {
    pub start: usize,
    pub len: usize,
}

impl SampleWindow {
    /// Compute the window for `frame` at `fps`.
    ///
    /// `fps` must be positive; the pipeline validates it before calling this.
    pub fn select(frame: u64, fps: f64, sample_rate: u32, sample_size: usize) -> Self {
        let center = ((frame as f64 / fps) * sample_rate as f64).floor();
        // Float-to-int casts saturate, so absurd frame indices land past the buffer
        let center = center as usize;
        Self {
            start: center.saturating_sub(sample_size / 2),
            len: sample_size,
        }
    }

    /// Copy the window out of `samples`. Positions outside the buffer read as silence.
    pub fn extract(&self, samples: &[f32]) -> Vec<f32> {
        (0..self.len)
            .map(|i| {
                self.start
                    .checked_add(i)
                    .and_then(|idx| samples.get(idx))
                    .copied()
                    .unwrap_or(0.0)
            })
            .collect()
    }
}
