use rustfft::num_complex::Complex;

/// Iterative radix-2 Cooley-Tukey FFT for power-of-two lengths.
///
/// Twiddles `exp(-2πi·k/N)` for `k < N/2` are computed once per engine; every stage
/// reads them with a stride.
pub struct Radix2Fft {
    len: usize,
    twiddles: Vec<Complex<f64>>,
}

impl Radix2Fft {
    /// Panics if `len` is not a non-zero power of two.
    pub fn new(len: usize) -> Self {
        assert!(len.is_power_of_two(), "FFT length must be a power of 2, got {}", len);

        let twiddles = (0..len / 2)
            .map(|k| {
                let angle = -2.0 * std::f64::consts::PI * k as f64 / len as f64;
                Complex::new(angle.cos(), angle.sin())
            })
            .collect();

        Self { len, twiddles }
    }

    /// Forward transform in place, unnormalized.
    pub fn process(&self, buffer: &mut [Complex<f64>]) {
        assert_eq!(buffer.len(), self.len, "buffer length does not match FFT length");
        let n = self.len;
        if n < 2 {
            return;
        }

        bit_reverse_permute(buffer);

        // Each stage merges pairs of half-size transforms: evens in the low half,
        // odds in the high half, combined with the twiddle for their bin.
        let mut size = 2;
        while size <= n {
            let half = size / 2;
            let stride = n / size;
            for chunk in buffer.chunks_exact_mut(size) {
                let (even, odd) = chunk.split_at_mut(half);
                for k in 0..half {
                    let t = self.twiddles[k * stride] * odd[k];
                    let e = even[k];
                    even[k] = e + t;
                    odd[k] = e - t;
                }
            }
            size *= 2;
        }
    }
}

fn bit_reverse_permute(buffer: &mut [Complex<f64>]) {
    let n = buffer.len();
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if i < j {
            buffer.swap(i, j);
        }
    }
}

/// Transform a quantized window into its phasors. The input is left untouched.
pub fn fft(samples: &[i16]) -> Vec<Complex<f64>> {
    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .map(|&s| Complex::new(s as f64, 0.0))
        .collect();
    Radix2Fft::new(samples.len()).process(&mut buffer);
    buffer
}

pub fn magnitudes(phasors: &[Complex<f64>]) -> Vec<f64> {
    phasors.iter().map(|c| c.norm()).collect()
}
