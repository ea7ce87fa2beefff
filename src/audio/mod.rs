pub mod analysis;
pub mod decode;
pub mod features;
pub mod fft;
pub mod quantize;
pub mod smoothing;
pub mod visualize;
pub mod window;
