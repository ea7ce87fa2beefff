use thiserror::Error;

use super::fft::{fft, magnitudes};
use super::quantize::quantize_window;
use super::smoothing::{normalize, smoothen};
use super::window::SampleWindow;

/// Bar heights for one frame, `sample_size / 2` entries covering DC up to Nyquist.
pub type VisualizationBars = Vec<f32>;

/// Inputs for a single frame's visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualizationRequest<'a> {
    /// Window length and twice the number of bars returned. Must be a power of two.
    pub sample_size: usize,
    /// One channel of audio, never mutated.
    pub data: &'a [f32],
    pub sample_rate: u32,
    pub frame: u64,
    pub fps: f64,
    /// Normalization divisor, normally the magnitude of the 16-bit range (32768).
    pub max_int: f64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisualizationError {
    #[error(
        "The number of samples must be a power of two. For example: 64, 128. Got instead: {sample_size}"
    )]
    InvalidSampleSize { sample_size: usize },

    #[error("A positive frame rate was not provided (got {fps})")]
    MissingFps { fps: f64 },

    #[error("Audio data is not big enough to provide {needed} samples (only {available} available)")]
    InsufficientData { needed: usize, available: usize },

    #[error("The normalization divisor must be positive and finite. Got instead: {max_int}")]
    InvalidMaxInt { max_int: f64 },
}

impl VisualizationRequest<'_> {
    /// Check preconditions in order; the first failure wins.
    pub fn validate(&self) -> Result<(), VisualizationError> {
        if !self.sample_size.is_power_of_two() {
            return Err(VisualizationError::InvalidSampleSize {
                sample_size: self.sample_size,
            });
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(VisualizationError::MissingFps { fps: self.fps });
        }
        if self.data.len() < self.sample_size {
            return Err(VisualizationError::InsufficientData {
                needed: self.sample_size,
                available: self.data.len(),
            });
        }
        if !(self.max_int.is_finite() && self.max_int > 0.0) {
            return Err(VisualizationError::InvalidMaxInt {
                max_int: self.max_int,
            });
        }
        Ok(())
    }
}

/// Compute the frequency bars for one frame.
///
/// Pure: the same request always yields bit-identical output, and nothing is
/// retained between calls.
pub fn compute_visualization(
    request: &VisualizationRequest<'_>,
) -> Result<VisualizationBars, VisualizationError> {
    request.validate()?;

    let window = SampleWindow::select(
        request.frame,
        request.fps,
        request.sample_rate,
        request.sample_size,
    );
    log::trace!(
        "frame {}: window [{}, {})",
        request.frame,
        window.start,
        window.start.saturating_add(window.len)
    );

    let ints = quantize_window(&window.extract(request.data));
    let phasors = fft(&ints);
    let smoothed = smoothen(&magnitudes(&phasors));

    let mut bars = normalize(&smoothed, request.sample_size, request.max_int);
    bars.truncate(request.sample_size / 2);
    Ok(bars)
}

/// Positional shorthand for [`compute_visualization`].
pub fn visualize(
    sample_size: usize,
    data: &[f32],
    sample_rate: u32,
    frame: u64,
    fps: f64,
    max_int: f64,
) -> Result<VisualizationBars, VisualizationError> {
    compute_visualization(&VisualizationRequest {
        sample_size,
        data,
        sample_rate,
        frame,
        fps,
        max_int,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_INT: f64 = 32768.0;

    fn sine(freq: f32, sample_rate: u32, len: usize, amplitude: f32) -> Vec<f32> {
        (0..len)
            .map(|i| {
                amplitude
                    * (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin()
            })
            .collect()
    }

    fn noise(len: usize) -> Vec<f32> {
        // deterministic LCG in [-1, 1)
        let mut state: u32 = 12345;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1103515245).wrapping_add(12345);
                (state >> 8) as f32 / (1u32 << 23) as f32 - 1.0
            })
            .collect()
    }

    #[test]
    fn returns_half_sample_size_bars() {
        let data = noise(8192);
        for sample_size in [2usize, 4, 16, 64, 256, 1024] {
            let bars = visualize(sample_size, &data, 44100, 10, 30.0, MAX_INT).unwrap();
            assert_eq!(bars.len(), sample_size / 2);
            assert!(bars.iter().all(|b| b.is_finite() && *b >= 0.0));
        }
    }

    #[test]
    fn rejects_non_power_of_two_sample_size() {
        let data = noise(1024);
        let err = visualize(100, &data, 44100, 0, 30.0, MAX_INT).unwrap_err();
        assert_eq!(err, VisualizationError::InvalidSampleSize { sample_size: 100 });

        let err = visualize(0, &data, 44100, 0, 30.0, MAX_INT).unwrap_err();
        assert_eq!(err, VisualizationError::InvalidSampleSize { sample_size: 0 });
    }

    #[test]
    fn rejects_missing_fps() {
        let data = noise(1024);
        for fps in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            let err = visualize(64, &data, 44100, 0, fps, MAX_INT).unwrap_err();
            assert!(matches!(err, VisualizationError::MissingFps { .. }));
        }
    }

    #[test]
    fn rejects_insufficient_data() {
        let data = noise(63);
        let err = visualize(64, &data, 44100, 0, 30.0, MAX_INT).unwrap_err();
        assert_eq!(
            err,
            VisualizationError::InsufficientData {
                needed: 64,
                available: 63
            }
        );
    }

    #[test]
    fn rejects_invalid_max_int() {
        let data = noise(64);
        for max_int in [0.0, -1.0, f64::NAN] {
            let err = visualize(64, &data, 44100, 0, 30.0, max_int).unwrap_err();
            assert!(matches!(err, VisualizationError::InvalidMaxInt { .. }));
        }
    }

    #[test]
    fn validation_checks_sample_size_first() {
        let err = visualize(100, &[], 44100, 0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, VisualizationError::InvalidSampleSize { .. }));

        let err = visualize(64, &[], 44100, 0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, VisualizationError::MissingFps { .. }));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = VisualizationError::InvalidSampleSize { sample_size: 100 };
        assert!(err.to_string().contains("power of two"));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn identical_calls_are_bit_identical() {
        let data = noise(44100);
        let a = visualize(512, &data, 44100, 17, 30.0, MAX_INT).unwrap();
        let b = visualize(512, &data, 44100, 17, 30.0, MAX_INT).unwrap();
        let a_bits: Vec<u32> = a.iter().map(|v| v.to_bits()).collect();
        let b_bits: Vec<u32> = b.iter().map(|v| v.to_bits()).collect();
        assert_eq!(a_bits, b_bits);
    }

    #[test]
    fn silence_yields_zero_bars() {
        let data = vec![0.0f32; 4096];
        let bars = visualize(256, &data, 44100, 3, 30.0, MAX_INT).unwrap();
        assert!(bars.iter().all(|&b| b == 0.0));
    }

    #[test]
    fn single_tone_peaks_at_its_bin() {
        // 800Hz at 6400Hz with 64 samples sits exactly on bin 8
        let sample_rate = 6400;
        let data = sine(800.0, sample_rate, 6400, 0.5);
        let bars = visualize(64, &data, sample_rate, 0, 30.0, MAX_INT).unwrap();

        let peak = bars
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 8);
        assert!(bars[8] > 0.2);

        for (i, &bar) in bars.iter().enumerate() {
            if (i as i64 - 8).abs() > 1 {
                assert!(bar < 0.01, "bin {} unexpectedly high: {}", i, bar);
            }
        }
    }

    #[test]
    fn window_past_end_reads_as_silence() {
        let data = vec![0.5f32; 128];
        // frame 30 at 30fps is sample 44100, far beyond the buffer
        let bars = visualize(64, &data, 44100, 30, 30.0, MAX_INT).unwrap();
        assert_eq!(bars.len(), 32);
        assert!(bars.iter().all(|&b| b == 0.0));
    }

    #[test]
    fn window_straddling_end_is_padded() {
        let data = vec![0.5f32; 100];
        // center at sample 80 -> window [48, 112), last 12 positions are silence
        let bars = visualize(64, &data, 2400, 1, 30.0, MAX_INT).unwrap();
        assert_eq!(bars.len(), 32);
        assert!(bars.iter().all(|b| b.is_finite()));
        assert!(bars[0] > 0.0);
    }

    #[test]
    fn scaling_max_int_scales_output_inversely() {
        let data = noise(4096);
        let base = visualize(128, &data, 44100, 5, 30.0, MAX_INT).unwrap();
        let scaled = visualize(128, &data, 44100, 5, 30.0, MAX_INT * 4.0).unwrap();
        for (a, b) in base.iter().zip(scaled.iter()) {
            assert!((a / 4.0 - b).abs() <= 1e-6 * a.abs().max(1e-6));
        }
    }

    #[test]
    fn does_not_mutate_input() {
        let data = noise(1024);
        let copy = data.clone();
        let _ = visualize(64, &data, 44100, 2, 30.0, MAX_INT).unwrap();
        assert_eq!(data, copy);
    }

    #[test]
    fn sample_size_one_yields_no_bars() {
        let bars = visualize(1, &[0.3], 44100, 0, 30.0, MAX_INT).unwrap();
        assert!(bars.is_empty());
    }
}
