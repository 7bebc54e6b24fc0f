//! Chromatic channel shift: red and blue sampled at opposite offsets.

use glam::Vec2;

use crate::image::FrameImage;

/// Angular speed of the offset direction, radians per second.
const SHIFT_SPEED: f32 = 0.1;
/// Offset length in texture units at zero and full weight.
const SHIFT_MIN: f32 = 0.01;
const SHIFT_MAX: f32 = 0.05;

/// Time-varying offset for the red channel; blue uses the negation.
pub fn shift_offset(weight: f32, time: f32) -> Vec2 {
    let angle = time * SHIFT_SPEED;
    let length = SHIFT_MIN + (SHIFT_MAX - SHIFT_MIN) * weight;
    Vec2::new(angle.sin(), angle.cos()) * length
}

/// Recombine red from `uv + offset`, green from the base color, blue from
/// `uv - offset`.
pub fn apply_color_shift(
    frame: &FrameImage,
    rgb: [f32; 3],
    uv: Vec2,
    weight: f32,
    time: f32,
) -> [f32; 3] {
    let offset = shift_offset(weight, time);
    let red = frame.sample(uv + offset)[0];
    let blue = frame.sample(uv - offset)[2];
    [red, rgb[1], blue]
}
