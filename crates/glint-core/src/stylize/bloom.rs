//! Highlight bloom.

use crate::grading::mix3;

/// Rec. 709 luminance weights, used for the bloom threshold.
const LUMA_REC709: [f32; 3] = [0.2126, 0.7152, 0.0722];
/// Luminance above which highlights glow.
const BLOOM_THRESHOLD: f32 = 0.8;
/// How strongly the excess is added back.
const BLOOM_GAIN: f32 = 2.0;

/// Push bright areas further, then mix by `weight`.
///
/// ```text
/// if luma709(rgb) > 0.8: bloomed = rgb + (rgb − 0.8) × 2
/// out = mix(rgb, bloomed, weight)
/// ```
pub fn apply_bloom(rgb: [f32; 3], weight: f32) -> [f32; 3] {
    let luma = rgb[0] * LUMA_REC709[0] + rgb[1] * LUMA_REC709[1] + rgb[2] * LUMA_REC709[2];
    if luma <= BLOOM_THRESHOLD {
        return rgb;
    }
    let bloomed = rgb.map(|c| c + (c - BLOOM_THRESHOLD) * BLOOM_GAIN);
    mix3(rgb, bloomed, weight)
}
