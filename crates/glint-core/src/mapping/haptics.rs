//! Haptic feedback events at the center and edge of the control region.

use serde::{Deserialize, Serialize};

/// Radial distance below which the pointer is "at center".
const CENTER_THRESHOLD: f32 = 0.05;
/// Radial distance at or above which the pointer is "at edge".
const EDGE_THRESHOLD: f32 = 0.98;

/// A discrete vibration request for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HapticPulse {
    /// Pointer entered the neutral center.
    Short,
    /// Pointer reached the region boundary.
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Center,
    Middle,
    Edge,
}

impl Zone {
    fn of(radial: f32) -> Self {
        if radial < CENTER_THRESHOLD {
            Self::Center
        } else if radial >= EDGE_THRESHOLD {
            Self::Edge
        } else {
            Self::Middle
        }
    }
}

/// Edge-triggered detector: a pulse fires only when the pointer enters a zone.
#[derive(Debug, Clone, Default)]
pub struct HapticTracker {
    zone: Option<Zone>,
}

impl HapticTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest radial distance; `None` means the pointer is gone.
    pub fn observe(&mut self, radial: Option<f32>) -> Option<HapticPulse> {
        let Some(radial) = radial else {
            self.zone = None;
            return None;
        };
        let zone = Zone::of(radial);
        let previous = self.zone.replace(zone);
        if previous == Some(zone) {
            return None;
        }
        match zone {
            Zone::Center => Some(HapticPulse::Short),
            Zone::Edge => Some(HapticPulse::Long),
            Zone::Middle => None,
        }
    }

    /// Forget the last zone (release, resize, mode switch).
    pub fn reset(&mut self) {
        self.zone = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entering_zones_fires_once() {
        let mut tracker = HapticTracker::new();
        assert_eq!(tracker.observe(Some(0.0)), Some(HapticPulse::Short));
        assert_eq!(tracker.observe(Some(0.01)), None);
        assert_eq!(tracker.observe(Some(0.5)), None);
        assert_eq!(tracker.observe(Some(1.0)), Some(HapticPulse::Long));
        assert_eq!(tracker.observe(Some(0.99)), None);
        assert_eq!(tracker.observe(Some(0.02)), Some(HapticPulse::Short));
    }

    #[test]
    fn test_release_rearms_tracker() {
        let mut tracker = HapticTracker::new();
        assert_eq!(tracker.observe(Some(1.0)), Some(HapticPulse::Long));
        assert_eq!(tracker.observe(None), None);
        assert_eq!(tracker.observe(Some(1.0)), Some(HapticPulse::Long));
    }

    #[test]
    fn test_middle_start_is_silent() {
        let mut tracker = HapticTracker::new();
        assert_eq!(tracker.observe(Some(0.4)), None);
    }
}
