//! Tonal stages: fade, exposure and contrast.

use super::{luma_bt601, mix3};

/// Fraction of `fade` used to pull toward luma.
const FADE_DESATURATE: f32 = 0.4;
/// Fraction of `fade` used to pull toward white.
const FADE_LIFT: f32 = 0.2;
/// Gamma exponent scale for exposure.
const EXPOSURE_SCALE: f32 = 0.5;
/// Slope gain for contrast around mid-gray.
const CONTRAST_SCALE: f32 = 0.5;
/// Contrast pivot.
const MID_GRAY: f32 = 0.5;

/// Faded-film look: lifted blacks and softened color.
///
/// ```text
/// rgb = mix(rgb, luma, fade × 0.4)
/// rgb = mix(rgb, 1,    fade × 0.2)
/// ```
pub fn apply_fade(rgb: [f32; 3], fade: f32) -> [f32; 3] {
    if fade.abs() < 1e-7 {
        return rgb;
    }
    let luma = luma_bt601(rgb);
    let toned = mix3(rgb, [luma; 3], fade * FADE_DESATURATE);
    mix3(toned, [1.0; 3], fade * FADE_LIFT)
}

/// Gamma-style exposure.
///
/// ```text
/// out = pow(max(rgb, 0), 1 / (1 + brightness × 0.5))
/// ```
///
/// Positive brightness lowers the exponent (brighter midtones); black and
/// white stay fixed.
pub fn apply_exposure(rgb: [f32; 3], brightness: f32) -> [f32; 3] {
    if brightness.abs() < 1e-7 {
        return rgb;
    }
    let exponent = 1.0 / (1.0 + brightness * EXPOSURE_SCALE);
    // Clamp to zero before power to avoid NaN from negative bases
    rgb.map(|c| c.max(0.0).powf(exponent))
}

/// Contrast around mid-gray.
///
/// ```text
/// out = (rgb − 0.5) × (1 + contrast × 0.5) + 0.5
/// ```
pub fn apply_contrast(rgb: [f32; 3], contrast: f32) -> [f32; 3] {
    if contrast.abs() < 1e-7 {
        return rgb;
    }
    let slope = 1.0 + contrast * CONTRAST_SCALE;
    rgb.map(|c| (c - MID_GRAY) * slope + MID_GRAY)
}
