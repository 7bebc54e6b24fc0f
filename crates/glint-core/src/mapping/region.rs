//! Control-region geometry and coordinate normalization.
//!
//! Pointer positions arrive in screen space (y grows downward). A region
//! clamps them to its boundary and projects them into a local unit domain:
//!
//! ```text
//!   Rect:   [0, 1] × [0, 1]    center (0.5, 0.5)
//!   Circle: [-1, 1] × [-1, 1]  center (0, 0), |p| ≤ 1
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Screen-space geometry against which pointer input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ControlRegion {
    /// Axis-aligned rectangle.
    Rect { origin: Vec2, size: Vec2 },
    /// Circle given by center and radius.
    Circle { center: Vec2, radius: f32 },
}

impl ControlRegion {
    /// Rectangle from its top-left corner and size.
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::Rect {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Circle from its center and radius.
    pub fn circle(cx: f32, cy: f32, radius: f32) -> Self {
        Self::Circle {
            center: Vec2::new(cx, cy),
            radius,
        }
    }

    /// True when the region has no usable area (e.g. before first layout).
    pub fn is_degenerate(&self) -> bool {
        match *self {
            Self::Rect { origin, size } => {
                !origin.is_finite() || !size.is_finite() || size.x <= 0.0 || size.y <= 0.0
            }
            Self::Circle { center, radius } => {
                !center.is_finite() || !radius.is_finite() || radius <= 0.0
            }
        }
    }

    /// Domain that [`normalize`](Self::normalize) projects into.
    pub fn domain(&self) -> CoordinateDomain {
        match self {
            Self::Rect { .. } => CoordinateDomain::Unit,
            Self::Circle { .. } => CoordinateDomain::Signed,
        }
    }

    /// Clamp a screen-space point onto the region.
    ///
    /// Rectangles clamp each axis independently. Circles pull outside points
    /// back onto the boundary along the ray from the center.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        match *self {
            Self::Rect { origin, size } => point.clamp(origin, origin + size),
            Self::Circle { center, radius } => {
                let d = point - center;
                let len = d.length();
                if len <= radius {
                    point
                } else {
                    center + d * (radius / len)
                }
            }
        }
    }

    /// Clamp and project a screen-space point into the region's local domain.
    ///
    /// Returns `None` for degenerate regions or non-finite points.
    pub fn normalize(&self, point: Vec2) -> Option<NormalizedCoordinate> {
        if self.is_degenerate() || !point.is_finite() {
            return None;
        }
        let clamped = self.clamp(point);
        let position = match *self {
            Self::Rect { origin, size } => ((clamped - origin) / size).clamp(Vec2::ZERO, Vec2::ONE),
            Self::Circle { center, radius } => {
                let p = (clamped - center) / radius;
                // Rounding in the radial clamp can leave |p| a hair above 1.
                p.clamp_length_max(1.0)
            }
        };
        Some(NormalizedCoordinate {
            position,
            domain: self.domain(),
        })
    }
}

/// The local domain a normalized coordinate lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateDomain {
    /// `[0, 1]` per axis, center at 0.5.
    Unit,
    /// `[-1, 1]` per axis, center at 0.
    Signed,
}

impl CoordinateDomain {
    /// Domain center.
    pub const fn center(self) -> f32 {
        match self {
            Self::Unit => 0.5,
            Self::Signed => 0.0,
        }
    }

    /// Distance from the center to the domain edge along an axis.
    pub const fn half_extent(self) -> f32 {
        match self {
            Self::Unit => 0.5,
            Self::Signed => 1.0,
        }
    }
}

/// A pointer position projected into a region's local domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCoordinate {
    pub position: Vec2,
    pub domain: CoordinateDomain,
}

impl NormalizedCoordinate {
    /// Coordinate in the `[0, 1]` domain.
    pub fn unit(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            domain: CoordinateDomain::Unit,
        }
    }

    /// Coordinate in the `[-1, 1]` domain.
    pub fn signed(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            domain: CoordinateDomain::Signed,
        }
    }

    /// Domain center as a point.
    pub fn center(&self) -> Vec2 {
        Vec2::splat(self.domain.center())
    }

    /// Center-relative offset scaled so the domain edge sits at ±1.
    pub fn offset(&self) -> Vec2 {
        (self.position - self.center()) / self.domain.half_extent()
    }

    /// Distance from the center, scaled so the edge maps to 1, clamped to 1.
    pub fn radial_distance(&self) -> f32 {
        self.offset().length().min(1.0)
    }

    /// The same point expressed in the `[0, 1]` domain.
    pub fn to_unit(&self) -> Self {
        match self.domain {
            CoordinateDomain::Unit => *self,
            CoordinateDomain::Signed => Self {
                position: (self.position + Vec2::ONE) * 0.5,
                domain: CoordinateDomain::Unit,
            },
        }
    }
}
