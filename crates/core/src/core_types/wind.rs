//! Wind state for a single simulation run
//!
//! One run uses exactly one wind snapshot. The plume rotation divides by wind
//! speed, so [`WindState::new`] floors speed at [`MIN_WIND_SPEED`] — speed is
//! strictly positive at every point of use, by construction. The type
//! deliberately does not implement `Deserialize`: decoded values would bypass
//! the floor.

use crate::core_types::units::{Degrees, MetersPerSecond};
use serde::Serialize;

/// Minimum wind speed in m/s. Calm readings are floored here rather than
/// letting the plume equation divide by zero.
pub const MIN_WIND_SPEED: f64 = 0.1;

/// Wind speed used when no live reading is available (m/s).
pub const FALLBACK_WIND_SPEED: f64 = 1.0;

/// Wind direction used when no live reading is available (degrees).
pub const FALLBACK_WIND_DIRECTION: f64 = 45.0;

/// Wind speed and direction, immutable for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindState {
    speed: MetersPerSecond,
    direction: Degrees,
}

impl WindState {
    /// Create a wind state, flooring speed at [`MIN_WIND_SPEED`].
    #[must_use]
    pub fn new(speed_ms: f64, direction_deg: f64) -> Self {
        let speed_ms = if speed_ms.is_finite() { speed_ms } else { MIN_WIND_SPEED };
        let direction_deg = if direction_deg.is_finite() { direction_deg } else { 0.0 };
        WindState {
            speed: MetersPerSecond::new(speed_ms.max(MIN_WIND_SPEED)),
            direction: Degrees::new(direction_deg),
        }
    }

    /// The documented fallback used when the weather provider is unavailable.
    #[must_use]
    pub fn fallback() -> Self {
        WindState::new(FALLBACK_WIND_SPEED, FALLBACK_WIND_DIRECTION)
    }

    /// Wind speed (m/s), strictly positive
    #[inline]
    #[must_use]
    pub fn speed(&self) -> MetersPerSecond {
        self.speed
    }

    /// Wind direction in degrees
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Degrees {
        self.direction
    }

    /// Wind direction in radians, for the rotation into the wind-aligned frame
    #[inline]
    #[must_use]
    pub fn direction_radians(&self) -> f64 {
        self.direction.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_is_floored() {
        assert_eq!(*WindState::new(0.0, 90.0).speed(), MIN_WIND_SPEED);
        assert_eq!(*WindState::new(0.05, 90.0).speed(), MIN_WIND_SPEED);
        assert_eq!(*WindState::new(3.2, 90.0).speed(), 3.2);
    }

    #[test]
    fn test_non_finite_inputs_degrade() {
        let wind = WindState::new(f64::NAN, f64::INFINITY);
        assert_eq!(*wind.speed(), MIN_WIND_SPEED);
        assert_eq!(*wind.direction(), 0.0);
    }

    #[test]
    fn test_fallback_values() {
        let wind = WindState::fallback();
        assert_eq!(*wind.speed(), 1.0);
        assert_eq!(*wind.direction(), 45.0);
    }
}
