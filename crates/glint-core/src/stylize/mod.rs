//! Stylized filters for the four-way blend and their weighted combination.
//!
//! ```text
//!              ┌── retro (top) ───────┐
//!   base ──────┼── sepia (right) ─────┼──→ Σ wᵢ·fᵢ / Σ wᵢ ──→ out
//!              ├── bloom (bottom) ────┤
//!              └── color shift (left) ┘
//! ```

pub mod bloom;
pub mod color_shift;
pub mod noise;
pub mod retro;
pub mod sepia;

use glam::Vec2;

use crate::image::FrameImage;
use crate::transform::params::BlendWeights;

pub use bloom::apply_bloom;
pub use color_shift::apply_color_shift;
pub use noise::hash_noise;
pub use retro::apply_retro;
pub use sepia::apply_sepia;

/// Below this weight sum the source passes through unchanged.
const WEIGHT_SUM_EPSILON: f32 = 1e-6;

/// Evaluate all four filters at pixel `(x, y)` and combine them by weight.
///
/// Alpha passes through from the source.
pub fn blend_filters(
    frame: &FrameImage,
    x: u32,
    y: u32,
    weights: &BlendWeights,
    time: f32,
) -> [f32; 4] {
    let base = frame.pixel(x as i64, y as i64);
    let total = weights.total();
    if total <= WEIGHT_SUM_EPSILON {
        return base;
    }

    let rgb = [base[0], base[1], base[2]];
    let uv = frame.uv_of(x, y);
    let pixel = Vec2::new(x as f32, y as f32);

    let layers = [
        (weights.top, apply_retro(rgb, uv, pixel, weights.top, time)),
        (weights.right, apply_sepia(rgb, weights.right)),
        (weights.bottom, apply_bloom(rgb, weights.bottom)),
        (
            weights.left,
            apply_color_shift(frame, rgb, uv, weights.left, time),
        ),
    ];

    let mut out = [0.0_f32; 3];
    for (w, color) in layers {
        if w <= 0.0 {
            continue;
        }
        for c in 0..3 {
            out[c] += color[c] * w;
        }
    }
    [out[0] / total, out[1] / total, out[2] / total, base[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> FrameImage {
        FrameImage::new(
            2,
            2,
            vec![
                [0.9, 0.2, 0.1, 1.0],
                [0.3, 0.6, 0.2, 0.5],
                [0.95, 0.9, 0.92, 1.0],
                [0.1, 0.1, 0.8, 0.25],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_zero_weights_return_source() {
        let f = frame();
        for y in 0..2 {
            for x in 0..2 {
                let out = blend_filters(&f, x, y, &BlendWeights::neutral(), 1.0);
                assert_eq!(out, f.pixel(x as i64, y as i64));
            }
        }
    }

    #[test]
    fn test_single_weight_selects_that_filter() {
        let f = frame();
        let w = BlendWeights {
            right: 1.0,
            ..BlendWeights::neutral()
        };
        let out = blend_filters(&f, 0, 0, &w, 0.0);
        let expected = apply_sepia([0.9, 0.2, 0.1], 1.0);
        for c in 0..3 {
            assert!((out[c] - expected[c]).abs() < 1e-6);
        }
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_split_weights_average_filters() {
        let f = frame();
        let w = BlendWeights {
            right: 0.5,
            bottom: 0.5,
            ..BlendWeights::neutral()
        };
        let out = blend_filters(&f, 0, 1, &w, 0.0);
        let rgb = [0.95, 0.9, 0.92];
        let sepia = apply_sepia(rgb, 0.5);
        let bloom = apply_bloom(rgb, 0.5);
        for c in 0..3 {
            let e = (sepia[c] + bloom[c]) * 0.5;
            assert!((out[c] - e).abs() < 1e-6, "channel {c}: {} vs {e}", out[c]);
        }
    }

    #[test]
    fn test_unnormalized_weights_are_divided_by_sum() {
        let f = frame();
        let w = BlendWeights {
            right: 3.0,
            ..BlendWeights::neutral()
        };
        let out = blend_filters(&f, 1, 0, &w, 0.0);
        let expected = apply_sepia([0.3, 0.6, 0.2], 3.0);
        for c in 0..3 {
            assert!((out[c] - expected[c]).abs() < 1e-5);
        }
    }

    #[test]
    fn test_alpha_passes_through() {
        let f = frame();
        let w = BlendWeights {
            top: 0.25,
            right: 0.25,
            bottom: 0.25,
            left: 0.25,
        };
        assert_eq!(blend_filters(&f, 1, 1, &w, 0.3)[3], 0.25);
    }
}
