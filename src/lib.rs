//! Turn a window of audio samples into normalized frequency bars, one call per
//! video frame.
//!
//! The entry point is [`audio::visualize::compute_visualization`].

pub mod audio;
pub mod encode;

pub use audio::visualize::{
    compute_visualization, visualize, VisualizationBars, VisualizationError, VisualizationRequest,
};
