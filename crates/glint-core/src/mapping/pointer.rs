//! Raw pointer/touch samples.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single screen-space pointer sample.
///
/// `active` is false once the finger lifts or the mouse button is released;
/// inactive samples never drive the filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub position: Vec2,
    pub active: bool,
}

impl PointerSample {
    /// A sample taken while touching.
    pub fn touching(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            active: true,
        }
    }

    /// A sample with no contact.
    pub fn released() -> Self {
        Self {
            position: Vec2::ZERO,
            active: false,
        }
    }
}
