//! Core transform evaluation: applies the filter chain to pixels.

use crate::grading::saturation::{apply_hue_shift, apply_saturation};
use crate::grading::temperature::apply_temperature;
use crate::grading::tone::{apply_contrast, apply_exposure, apply_fade};
use crate::image::FrameImage;
use crate::stylize::blend_filters;
use crate::transform::params::{FilterParameterSet, GradeParams};

/// The grade chain. `filter.wgsl` mirrors this exactly.
///
/// Stages, in order:
/// 1. Fade (toward luma, then toward white)
/// 2. Exposure (gamma)
/// 3. Temperature
/// 4. Contrast around mid-gray
/// 5. Saturation
/// 6. Hue shift (input clamped to `[0, 1]` first)
///
/// The result is clamped to `[0, 1]`. Neutral parameters return the input
/// untouched, including out-of-range values.
pub fn evaluate_grade(rgb: [f32; 3], params: &GradeParams) -> [f32; 3] {
    if params.is_neutral() {
        return rgb;
    }
    let rgb = apply_fade(rgb, params.fade);
    let rgb = apply_exposure(rgb, params.brightness);
    let rgb = apply_temperature(rgb, params.temperature);
    let rgb = apply_contrast(rgb, params.contrast);
    let rgb = apply_saturation(rgb, params.saturation);
    let rgb = apply_hue_shift(rgb, params.hue_shift);
    rgb.map(|c| c.clamp(0.0, 1.0))
}

/// Evaluate one output pixel. Alpha always passes through.
pub fn evaluate_pixel(
    frame: &FrameImage,
    x: u32,
    y: u32,
    params: &FilterParameterSet,
    time: f32,
) -> [f32; 4] {
    match params {
        FilterParameterSet::Grade(grade) => {
            let px = frame.pixel(x as i64, y as i64);
            let [r, g, b] = evaluate_grade([px[0], px[1], px[2]], grade);
            [r, g, b, px[3]]
        }
        FilterParameterSet::Blend(weights) => blend_filters(frame, x, y, weights, time),
    }
}

/// Render a whole frame on the CPU.
pub fn render_frame(frame: &FrameImage, params: &FilterParameterSet, time: f32) -> FrameImage {
    if params.is_neutral() {
        return frame.clone();
    }
    let mut pixels = Vec::with_capacity(frame.pixel_count());
    for y in 0..frame.height {
        for x in 0..frame.width {
            pixels.push(evaluate_pixel(frame, x, y, params, time));
        }
    }
    FrameImage {
        width: frame.width,
        height: frame.height,
        pixels,
    }
}
