use serde::Serialize;

/// Bars computed for one output frame, ready to hand to a renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameBars {
    /// Frame index
    pub frame: u64,
    /// Time in seconds
    pub time: f64,
    /// Normalized bar heights (nominally 0.0-1.0)
    pub bars: Vec<f32>,
}

/// Settings shared by every frame of an analysis run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalysisSettings {
    /// Samples per FFT window; half as many bars come out
    pub sample_size: usize,
    pub fps: f64,
    pub max_int: f64,
    /// Average each frame with its neighbours
    pub temporal_smoothing: bool,
}
