//! Sepia toning.

use crate::grading::{luma_bt601, mix3};

/// Tint applied to the luma.
const SEPIA_TONE: [f32; 3] = [1.2, 1.0, 0.8];

/// Desaturate to luma, tint toward sepia, and mix by `weight`.
pub fn apply_sepia(rgb: [f32; 3], weight: f32) -> [f32; 3] {
    let luma = luma_bt601(rgb);
    let toned = SEPIA_TONE.map(|t| luma * t);
    mix3(rgb, toned, weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_weight_is_tinted_luma() {
        let out = apply_sepia([0.5, 0.5, 0.5], 1.0);
        assert!((out[0] - 0.6).abs() < 1e-6);
        assert!((out[1] - 0.5).abs() < 1e-6);
        assert!((out[2] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_zero_weight_is_identity() {
        let rgb = [0.9, 0.1, 0.3];
        assert_eq!(apply_sepia(rgb, 0.0), rgb);
    }
}
