//! Interaction-to-parameter mapping.
//!
//! Converts a pointer sample over a control region into a
//! [`FilterParameterSet`]. Input outside the region is clamped, never
//! rejected; missing or unusable input yields the neutral set.
//!
//! # Grade formulas
//! With `(ox, oy)` the center-relative offset scaled to `[-1, 1]`
//! (screen y grows downward) and `r = min(|(ox, oy)|, 1)`:
//! ```text
//!   brightness  = -oy
//!   temperature =  ox
//!   contrast    =  r
//!   saturation  =  r
//!   fade        =  r × 0.5
//!   hue_shift   =  ox × 0.5
//! ```

pub mod haptics;
pub mod pointer;
pub mod region;

use crate::transform::params::{BlendWeights, FilterMode, FilterParameterSet, GradeParams};
use pointer::PointerSample;
use region::{ControlRegion, NormalizedCoordinate};

/// Fade is half the radial distance.
const FADE_SCALE: f32 = 0.5;
/// Hue shift is half the horizontal offset.
const HUE_SHIFT_SCALE: f32 = 0.5;
/// Below this total excess the pointer counts as centered.
const WEIGHT_EPSILON: f32 = 1e-6;

/// Map a pointer sample to the parameter set for `mode`.
///
/// Returns the neutral set when there is no sample, the sample is inactive,
/// or the region cannot be normalized against.
pub fn map(
    pointer: Option<&PointerSample>,
    region: &ControlRegion,
    mode: FilterMode,
) -> FilterParameterSet {
    match normalize_pointer(pointer, region) {
        Some(coord) => map_coordinate(&coord, mode),
        None => FilterParameterSet::neutral(mode),
    }
}

/// Project an active pointer sample into the region's local domain.
pub fn normalize_pointer(
    pointer: Option<&PointerSample>,
    region: &ControlRegion,
) -> Option<NormalizedCoordinate> {
    let sample = pointer.filter(|p| p.active)?;
    region.normalize(sample.position)
}

/// Derive the parameter set for `mode` from an already-normalized coordinate.
pub fn map_coordinate(coord: &NormalizedCoordinate, mode: FilterMode) -> FilterParameterSet {
    match mode {
        FilterMode::Grade => FilterParameterSet::Grade(grade_from_coordinate(coord)),
        FilterMode::Blend => FilterParameterSet::Blend(BlendWeights::from_coordinate(coord)),
    }
}

/// Continuous grade for a normalized coordinate.
pub fn grade_from_coordinate(coord: &NormalizedCoordinate) -> GradeParams {
    let offset = coord.offset();
    let radial = coord.radial_distance();
    GradeParams {
        brightness: -offset.y,
        temperature: offset.x,
        contrast: radial,
        saturation: radial,
        fade: radial * FADE_SCALE,
        hue_shift: offset.x * HUE_SHIFT_SCALE,
    }
    .clamped()
}

impl BlendWeights {
    /// Four-way weights from a normalized coordinate.
    ///
    /// Each side's weight is the pointer's excess past the center toward that
    /// side, divided by the total excess. A centered pointer gives all zeros.
    ///
    /// Vertical excess is measured y-up, unlike the y-down `brightness` axis,
    /// so `top` always belongs to the upper edge of the region.
    pub fn from_coordinate(coord: &NormalizedCoordinate) -> Self {
        let unit = coord.to_unit();
        let nx = unit.position.x;
        // Pointer input is y-down.
        let ny = 1.0 - unit.position.y;

        let top = (ny - 0.5).max(0.0);
        let bottom = (0.5 - ny).max(0.0);
        let right = (nx - 0.5).max(0.0);
        let left = (0.5 - nx).max(0.0);

        let total = top + bottom + right + left;
        if total <= WEIGHT_EPSILON {
            return Self::neutral();
        }
        Self {
            top: top / total,
            right: right / total,
            bottom: bottom / total,
            left: left / total,
        }
    }
}
