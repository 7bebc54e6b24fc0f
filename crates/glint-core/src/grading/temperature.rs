//! Color temperature as a per-channel multiplier.
//!
//! Warm and cool use different gains:
//! ```text
//!   t > 0 (warm): [1 + 0.30t, 1 + 0.05t, 1 − 0.30t]
//!   t < 0 (cool): [1 − 0.20c, 1,         1 + 0.40c]   with c = −t
//! ```

const WARM_GAIN: [f32; 3] = [0.30, 0.05, -0.30];
const COOL_GAIN: [f32; 3] = [-0.20, 0.0, 0.40];

/// Per-channel multipliers for a temperature in `[-1, 1]`.
pub fn temperature_multipliers(temperature: f32) -> [f32; 3] {
    let (gain, amount) = if temperature >= 0.0 {
        (WARM_GAIN, temperature)
    } else {
        (COOL_GAIN, -temperature)
    };
    gain.map(|g| 1.0 + g * amount)
}

/// Warm or cool the image.
pub fn apply_temperature(rgb: [f32; 3], temperature: f32) -> [f32; 3] {
    if temperature.abs() < 1e-7 {
        return rgb;
    }
    let m = temperature_multipliers(temperature);
    [rgb[0] * m[0], rgb[1] * m[1], rgb[2] * m[2]]
}
