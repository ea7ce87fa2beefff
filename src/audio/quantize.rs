/// Largest positive value of the 16-bit range.
const POSITIVE_SCALE: f32 = 32767.0;
/// Magnitude of the most negative value of the 16-bit range.
const NEGATIVE_SCALE: f32 = 32768.0;

/// Convert one float sample to signed 16-bit fixed point.
///
/// Input is clamped to [-1, 1] so out-of-range samples saturate instead of wrapping.
/// NaN maps to silence.
pub fn to_int16(sample: f32) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    let clamped = sample.clamp(-1.0, 1.0);
    let scaled = if clamped > 0.0 {
        clamped * POSITIVE_SCALE
    } else {
        clamped * NEGATIVE_SCALE
    };
    // `as` truncates toward zero and saturates at the i16 bounds
    scaled as i16
}

pub fn quantize_window(samples: &[f32]) -> Vec<i16> {
    samples.iter().map(|&s| to_int16(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_scale_maps_to_range_ends() {
        assert_eq!(to_int16(1.0), i16::MAX);
        assert_eq!(to_int16(-1.0), i16::MIN);
        assert_eq!(to_int16(0.0), 0);
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        assert_eq!(to_int16(1.5), i16::MAX);
        assert_eq!(to_int16(100.0), i16::MAX);
        assert_eq!(to_int16(-3.0), i16::MIN);
        assert_eq!(to_int16(f32::INFINITY), i16::MAX);
        assert_eq!(to_int16(f32::NEG_INFINITY), i16::MIN);
        assert_eq!(to_int16(f32::NAN), 0);
    }

    #[test]
    fn scales_linearly() {
        assert_eq!(to_int16(0.5), 16383);
        assert_eq!(to_int16(-0.5), -16384);
    }

    #[test]
    fn window_preserves_order_and_length() {
        let ints = quantize_window(&[0.0, 1.0, -1.0, 0.25]);
        assert_eq!(ints, vec![0, 32767, -32768, 8191]);
    }
}
