/// Binomial low-pass over neighbouring bins: previous, current, next.
const KERNEL: [f64; 3] = [0.25, 0.5, 0.25];

/// Smooth a magnitude sequence across bins.
///
/// Neighbours outside the sequence are clamped to the nearest edge bin.
pub fn smoothen(magnitudes: &[f64]) -> Vec<f64> {
    let n = magnitudes.len();
    if n < 2 {
        return magnitudes.to_vec();
    }

    (0..n)
        .map(|i| {
            let prev = magnitudes[i.saturating_sub(1)];
            let next = magnitudes[(i + 1).min(n - 1)];
            KERNEL[0] * prev + KERNEL[1] * magnitudes[i] + KERNEL[2] * next
        })
        .collect()
}

/// Scale magnitudes into bar heights: divide by `(sample_size / 2) * max_int`.
///
/// Nominally lands in [0, 1] for typical audio, but is not clamped.
pub fn normalize(magnitudes: &[f64], sample_size: usize, max_int: f64) -> Vec<f32> {
    let divisor = (sample_size / 2) as f64 * max_int;
    magnitudes.iter().map(|&m| (m / divisor) as f32).collect()
}
