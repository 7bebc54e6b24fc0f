//! Grade stages: fade, exposure, temperature, contrast, saturation, hue shift.
//!
//! Each stage is a pure `[f32; 3] -> [f32; 3]` function that returns its
//! input untouched at its neutral value.

pub mod saturation;
pub mod temperature;
pub mod tone;

/// ITU-R BT.601 luma weights, used by every grade stage.
pub const LUMA_BT601: [f32; 3] = [0.299, 0.587, 0.114];

/// BT.601 luma of an RGB triple.
pub fn luma_bt601(rgb: [f32; 3]) -> f32 {
    rgb[0] * LUMA_BT601[0] + rgb[1] * LUMA_BT601[1] + rgb[2] * LUMA_BT601[2]
}

/// Linear interpolation `a + (b - a) × t`, per channel.
pub(crate) fn mix3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}
