use rayon::prelude::*;

use super::features::{AnalysisSettings, FrameBars};
use super::visualize::{
    compute_visualization, VisualizationBars, VisualizationError, VisualizationRequest,
};

/// Number of output frames needed to cover `total_samples`.
pub fn frame_count(total_samples: usize, sample_rate: u32, fps: f64) -> u64 {
    if sample_rate == 0 || !(fps.is_finite() && fps > 0.0) {
        return 0;
    }
    let duration = total_samples as f64 / sample_rate as f64;
    (duration * fps).ceil() as u64
}

/// Average the bars of `frame - 1`, `frame` and `frame + 1`.
///
/// Each neighbour is computed independently; the previous frame is clamped at 0.
pub fn visualize_smoothed(
    request: &VisualizationRequest<'_>,
) -> Result<VisualizationBars, VisualizationError> {
    let neighbours = [
        request.frame.saturating_sub(1),
        request.frame,
        request.frame.saturating_add(1),
    ];

    let mut sum = vec![0.0f32; request.sample_size / 2];
    for frame in neighbours {
        let bars = compute_visualization(&VisualizationRequest { frame, ..*request })?;
        for (acc, bar) in sum.iter_mut().zip(bars) {
            *acc += bar;
        }
    }

    Ok(sum.into_iter().map(|v| v / neighbours.len() as f32).collect())
}

/// Compute bars for a single frame of `samples`.
pub fn analyze_frame(
    samples: &[f32],
    sample_rate: u32,
    settings: &AnalysisSettings,
    frame: u64,
) -> Result<FrameBars, VisualizationError> {
    let request = VisualizationRequest {
        sample_size: settings.sample_size,
        data: samples,
        sample_rate,
        frame,
        fps: settings.fps,
        max_int: settings.max_int,
    };

    let bars = if settings.temporal_smoothing {
        visualize_smoothed(&request)?
    } else {
        compute_visualization(&request)?
    };

    Ok(FrameBars {
        frame,
        time: frame as f64 / settings.fps,
        bars,
    })
}

/// Compute bars for every frame of `samples`, in parallel across frame indices.
pub fn analyze(
    samples: &[f32],
    sample_rate: u32,
    settings: &AnalysisSettings,
) -> Result<Vec<FrameBars>, VisualizationError> {
    // Validate once up front so an invalid request fails without spawning work.
    VisualizationRequest {
        sample_size: settings.sample_size,
        data: samples,
        sample_rate,
        frame: 0,
        fps: settings.fps,
        max_int: settings.max_int,
    }
    .validate()?;

    let total_frames = frame_count(samples.len(), sample_rate, settings.fps);
    log::info!(
        "Computing {} bars for {} frames (window={}, smoothing={})...",
        settings.sample_size / 2,
        total_frames,
        settings.sample_size,
        settings.temporal_smoothing
    );

    (0..total_frames)
        .into_par_iter()
        .map(|frame| analyze_frame(samples, sample_rate, settings, frame))
        .collect()
}
