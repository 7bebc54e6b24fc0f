//! Screen-space hash noise, matching the classic shader one-liner.

use glam::Vec2;

const HASH_DIR: Vec2 = Vec2::new(12.9898, 78.233);
const HASH_SCALE: f32 = 43758.5453;

/// Pseudo-random value in `[0, 1)` seeded by position and time.
///
/// ```text
/// fract(sin(dot(p, (12.9898, 78.233)) + time) × 43758.5453)
/// ```
pub fn hash_noise(p: Vec2, time: f32) -> f32 {
    let v = ((p.dot(HASH_DIR) + time).sin() * HASH_SCALE).fract();
    // `fract` keeps the sign in Rust; GLSL's is always non-negative.
    if v < 0.0 { v + 1.0 } else { v }
}
