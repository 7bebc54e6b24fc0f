//! Saturation and HSL hue shift.

use palette::{FromColor, Hsl, ShiftHue, Srgb};

use super::{luma_bt601, mix3};

/// Saturation gain per unit of the `saturation` parameter.
const SATURATION_SCALE: f32 = 0.5;
/// Fraction of the hue circle per unit of `hue_shift`.
const HUE_SHIFT_TURNS: f32 = 0.05;
/// Below this magnitude the hue stage is bypassed.
const HUE_SHIFT_EPSILON: f32 = 0.001;

/// Scale chroma away from BT.601 luma.
///
/// ```text
/// out = mix(luma, rgb, 1 + saturation × 0.5)
/// ```
pub fn apply_saturation(rgb: [f32; 3], saturation: f32) -> [f32; 3] {
    if saturation.abs() < 1e-7 {
        return rgb;
    }
    let luma = luma_bt601(rgb);
    mix3([luma; 3], rgb, 1.0 + saturation * SATURATION_SCALE)
}

/// Rotate hue by `hue_shift × 0.05` turns.
///
/// Input is clamped to `[0, 1]` before the HSL round trip. Skipped when
/// `|hue_shift| < 0.001`.
pub fn apply_hue_shift(rgb: [f32; 3], hue_shift: f32) -> [f32; 3] {
    if hue_shift.abs() < HUE_SHIFT_EPSILON {
        return rgb;
    }
    rotate_hue(rgb.map(|c| c.clamp(0.0, 1.0)), hue_shift * HUE_SHIFT_TURNS)
}

/// Convert to HSL, add `turns` to the hue (mod 1), and convert back.
pub fn rotate_hue(rgb: [f32; 3], turns: f32) -> [f32; 3] {
    let hsl: Hsl = Hsl::from_color(Srgb::new(rgb[0], rgb[1], rgb[2]));
    let out = Srgb::from_color(hsl.shift_hue(turns * 360.0));
    [out.red, out.green, out.blue]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn assert_close(a: [f32; 3], b: [f32; 3], msg: &str) {
        for c in 0..3 {
            assert!(
                (a[c] - b[c]).abs() <= EPSILON,
                "{msg}: channel {c}: {:.6} vs {:.6}",
                a[c],
                b[c]
            );
        }
    }

    #[test]
    fn test_saturation_zero_is_identity() {
        let rgb = [0.3, 0.6, 0.9];
        assert_eq!(apply_saturation(rgb, 0.0), rgb);
    }

    #[test]
    fn test_saturation_preserves_gray() {
        let gray = [0.4, 0.4, 0.4];
        assert_close(apply_saturation(gray, 1.0), gray, "gray");
    }

    #[test]
    fn test_saturation_increases_spread() {
        let rgb = [0.6, 0.4, 0.3];
        let out = apply_saturation(rgb, 1.0);
        assert!(out[0] - out[2] > rgb[0] - rgb[2]);
    }

    #[test]
    fn test_small_hue_shift_is_bypassed() {
        let rgb = [1.5, -0.2, 0.3];
        assert_eq!(apply_hue_shift(rgb, 0.0009), rgb, "bypass must not clamp");
    }

    #[test]
    fn test_hsl_round_trip_is_lossless() {
        let colors = [
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0],
            [0.5, 0.5, 0.5],
            [1.0, 0.0, 0.0],
            [0.2, 0.7, 0.4],
            [0.9, 0.1, 0.6],
            [0.05, 0.3, 0.95],
        ];
        for rgb in colors {
            assert_close(rotate_hue(rgb, 0.0), rgb, "round trip");
        }
    }

    #[test]
    fn test_full_turn_is_identity() {
        let rgb = [0.8, 0.3, 0.1];
        assert_close(rotate_hue(rgb, 1.0), rgb, "full turn");
    }

    #[test]
    fn test_third_turn_cycles_primaries() {
        // Red rotated by 120° becomes green.
        assert_close(rotate_hue([1.0, 0.0, 0.0], 1.0 / 3.0), [0.0, 1.0, 0.0], "red→green");
    }

    #[test]
    fn test_hue_shift_preserves_gray() {
        let gray = [0.5, 0.5, 0.5];
        assert_close(apply_hue_shift(gray, 1.0), gray, "gray");
    }
}
