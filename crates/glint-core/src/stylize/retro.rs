//! Retro film look: per-channel grain, warm tint and a radial vignette.

use glam::Vec2;

use super::noise::hash_noise;

/// Peak-to-peak grain amplitude at full weight.
const GRAIN_STRENGTH: f32 = 0.15;
/// Warm print tint.
const RETRO_TINT: [f32; 3] = [1.1, 1.0, 0.85];
/// Squared distance from center where darkening starts and saturates.
const VIGNETTE_INNER: f32 = 0.1;
const VIGNETTE_OUTER: f32 = 0.5;
/// Darkening at the corners.
const VIGNETTE_STRENGTH: f32 = 0.7;
/// Noise-seed offset between channels, in pixels.
const CHANNEL_SEED_STEP: Vec2 = Vec2::new(13.1, 7.7);

/// GLSL-style Hermite smoothstep.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Vignette multiplier at texture coordinate `uv`: 1 at center, darker toward corners.
pub fn vignette(uv: Vec2) -> f32 {
    let d = uv - Vec2::splat(0.5);
    1.0 - smoothstep(VIGNETTE_INNER, VIGNETTE_OUTER, d.length_squared()) * VIGNETTE_STRENGTH
}

/// Apply the retro filter.
///
/// `pixel` seeds the grain; the grain amplitude scales with `weight`.
pub fn apply_retro(rgb: [f32; 3], uv: Vec2, pixel: Vec2, weight: f32, time: f32) -> [f32; 3] {
    let shade = vignette(uv);
    std::array::from_fn(|c| {
        let seed = pixel + CHANNEL_SEED_STEP * c as f32;
        let grain = (hash_noise(seed, time) - 0.5) * GRAIN_STRENGTH * weight;
        (rgb[c] + grain) * RETRO_TINT[c] * shade
    })
}
