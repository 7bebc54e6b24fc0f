//! Filter parameter sets produced by the mapper and consumed by the pipeline.
//!
//! `FilterParameterSet` is the single contract between input mapping and
//! rendering. The CPU pipeline and `filter.wgsl` both read it.

use serde::{Deserialize, Serialize};

/// Which pipeline variant the pointer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Continuous six-parameter grade.
    #[default]
    Grade,
    /// Four-way stylized filter blend.
    Blend,
}

impl FilterMode {
    /// GPU-compatible integer for the shader uniform.
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::Grade => 0,
            Self::Blend => 1,
        }
    }

    /// Whether output changes over time even with fixed parameters.
    pub const fn is_time_varying(self) -> bool {
        matches!(self, Self::Blend)
    }
}

/// Continuous grade. Every field at 0.0 is the identity transform.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GradeParams {
    /// Exposure shift in `[-1, 1]`. Positive brightens.
    pub brightness: f32,
    /// Color temperature in `[-1, 1]`. Positive is warm, negative cool.
    pub temperature: f32,
    /// Contrast boost in `[0, 1]`.
    pub contrast: f32,
    /// Saturation boost in `[0, 1]`.
    pub saturation: f32,
    /// Faded-film strength in `[0, 1]`.
    pub fade: f32,
    /// Hue shift in `[-1, 1]`, in units of 1/20 of the hue circle.
    pub hue_shift: f32,
}

impl GradeParams {
    /// All-zero grade.
    pub const fn neutral() -> Self {
        Self {
            brightness: 0.0,
            temperature: 0.0,
            contrast: 0.0,
            saturation: 0.0,
            fade: 0.0,
            hue_shift: 0.0,
        }
    }

    /// True when every field is exactly zero.
    pub fn is_neutral(&self) -> bool {
        *self == Self::neutral()
    }

    /// Clamp each field to its own valid range.
    pub fn clamped(self) -> Self {
        Self {
            brightness: self.brightness.clamp(-1.0, 1.0),
            temperature: self.temperature.clamp(-1.0, 1.0),
            contrast: self.contrast.clamp(0.0, 1.0),
            saturation: self.saturation.clamp(0.0, 1.0),
            fade: self.fade.clamp(0.0, 1.0),
            hue_shift: self.hue_shift.clamp(-1.0, 1.0),
        }
    }
}

/// Weights for the four stylized filters, one per side of the control region.
///
/// Either all zero, or non-negative and summing to 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BlendWeights {
    /// Retro grain + vignette.
    pub top: f32,
    /// Sepia.
    pub right: f32,
    /// Bloom.
    pub bottom: f32,
    /// RGB channel shift.
    pub left: f32,
}

impl BlendWeights {
    /// All-zero weights; the blend passes the source through.
    pub const fn neutral() -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        }
    }

    /// Sum of all four weights.
    pub fn total(&self) -> f32 {
        self.top + self.right + self.bottom + self.left
    }

    /// True when all weights are zero.
    pub fn is_neutral(&self) -> bool {
        *self == Self::neutral()
    }

    /// Weights as `[top, right, bottom, left]`.
    pub const fn to_array(self) -> [f32; 4] {
        [self.top, self.right, self.bottom, self.left]
    }
}

/// The full parameter set for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FilterParameterSet {
    Grade(GradeParams),
    Blend(BlendWeights),
}

impl FilterParameterSet {
    /// The neutral set for a mode.
    pub const fn neutral(mode: FilterMode) -> Self {
        match mode {
            FilterMode::Grade => Self::Grade(GradeParams::neutral()),
            FilterMode::Blend => Self::Blend(BlendWeights::neutral()),
        }
    }

    /// Mode this set belongs to.
    pub const fn mode(&self) -> FilterMode {
        match self {
            Self::Grade(_) => FilterMode::Grade,
            Self::Blend(_) => FilterMode::Blend,
        }
    }

    /// True when rendering with this set leaves the source unchanged.
    pub fn is_neutral(&self) -> bool {
        match self {
            Self::Grade(g) => g.is_neutral(),
            Self::Blend(w) => w.is_neutral(),
        }
    }
}

impl Default for FilterParameterSet {
    fn default() -> Self {
        Self::neutral(FilterMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_sets_are_neutral() {
        assert!(FilterParameterSet::neutral(FilterMode::Grade).is_neutral());
        assert!(FilterParameterSet::neutral(FilterMode::Blend).is_neutral());
        assert_eq!(FilterParameterSet::default().mode(), FilterMode::Grade);
    }

    #[test]
    fn test_grade_clamp_respects_field_ranges() {
        let g = GradeParams {
            brightness: -3.0,
            temperature: 2.0,
            contrast: -0.5,
            saturation: 1.5,
            fade: 9.0,
            hue_shift: -7.0,
        }
        .clamped();
        assert_eq!(g.brightness, -1.0);
        assert_eq!(g.temperature, 1.0);
        assert_eq!(g.contrast, 0.0);
        assert_eq!(g.saturation, 1.0);
        assert_eq!(g.fade, 1.0);
        assert_eq!(g.hue_shift, -1.0);
    }

    #[test]
    fn test_parameter_set_serializes_with_mode_tag() {
        let set = FilterParameterSet::Blend(BlendWeights {
            right: 1.0,
            ..BlendWeights::neutral()
        });
        let json = serde_json::to_value(set).unwrap();
        assert_eq!(json["mode"], "blend");
        assert_eq!(json["right"], 1.0);
    }
}
