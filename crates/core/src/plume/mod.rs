//! Gaussian plume dispersion engine
//!
//! Implements the steady-state Gaussian plume model for ground-level point
//! sources under a single wind snapshot.
//!
//! # References
//! - Turner, D.B. (1970). "Workbook of Atmospheric Dispersion Estimates."
//!   U.S. EPA Office of Air Programs, AP-26.
//! - Briggs, G.A. (1973). "Diffusion estimation for small emissions."
//!   ATDL Contribution File No. 79, NOAA.
//! - Stockie, J.M. (2011). "The mathematics of atmospheric dispersion
//!   modeling." SIAM Review, 53(2), 349-372.
//!
//! # Model
//!
//! Receptor offsets from each source are rotated into a wind-aligned frame:
//!
//! ```text
//! rx = dx·cos θ − dy·sin θ     (downwind axis)
//! ry = dx·sin θ + dy·cos θ     (crosswind axis)
//! ```
//!
//! Only receptors strictly downwind (`rx > 0`) receive a contribution — a
//! plume does not propagate upwind. Spread grows with downwind distance
//! through the open-terrain dispersion coefficients, and concentration at
//! receptor height z follows the standard plume form:
//!
//! ```text
//! C = Q / (2π·u·σy·σz) · exp(−½(ry/σy)²) · exp(−½(z/σz)²)
//! ```
//!
//! Contributions are additive across sources and order-independent up to
//! floating-point rounding; the accumulation pass is parallel over cells with
//! a fixed source order inside each cell.

use crate::core_types::geometry::PlanarPoint;
use crate::core_types::wind::WindState;
use crate::emission::EmissionSource;
use crate::grid::SamplingGrid;
use std::f64::consts::PI;
use tracing::debug;

/// Dispersion constants for near-neutral open terrain
pub mod constants {
    /// Receptor height above ground (m): breathing height for street-level
    /// exposure
    pub const RECEPTOR_HEIGHT: f64 = 1.5;

    /// Lateral spread coefficient (σy growth per meter downwind)
    pub const LATERAL_SPREAD: f64 = 0.22;

    /// Lateral spread curvature: flattens σy growth at long range
    pub const LATERAL_CURVATURE: f64 = 0.0004;

    /// Vertical spread coefficient (σz growth per meter downwind)
    pub const VERTICAL_SPREAD: f64 = 0.20;
}

/// Wind-aligned rotation frame, precomputed once per run.
#[derive(Debug, Clone, Copy)]
pub struct WindFrame {
    speed: f64,
    sin_theta: f64,
    cos_theta: f64,
}

impl WindFrame {
    /// Precompute the rotation for a wind state.
    #[must_use]
    pub fn new(wind: &WindState) -> Self {
        let theta = wind.direction_radians();
        WindFrame {
            speed: *wind.speed(),
            sin_theta: theta.sin(),
            cos_theta: theta.cos(),
        }
    }

    /// Wind speed (m/s), strictly positive
    #[inline]
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Rotate a planar offset into `(downwind, crosswind)` coordinates.
    #[inline]
    #[must_use]
    pub fn rotate(&self, dx: f64, dy: f64) -> (f64, f64) {
        let downwind = dx * self.cos_theta - dy * self.sin_theta;
        let crosswind = dx * self.sin_theta + dy * self.cos_theta;
        (downwind, crosswind)
    }
}

/// Lateral and vertical dispersion coefficients at a downwind distance (m).
#[inline]
#[must_use]
pub fn dispersion_coefficients(downwind: f64) -> (f64, f64) {
    let sigma_y =
        constants::LATERAL_SPREAD * downwind / (1.0 + constants::LATERAL_CURVATURE * downwind).sqrt();
    let sigma_z = constants::VERTICAL_SPREAD * downwind;
    (sigma_y, sigma_z)
}

/// Concentration contribution of one source at one receptor (g/m³).
///
/// Exactly zero for receptors at or upwind of the source (`rx ≤ 0`), and zero
/// when either dispersion coefficient vanishes (the receptor sits on the
/// source) — guards, not errors.
#[must_use]
pub fn concentration_at(
    source: &EmissionSource,
    frame: &WindFrame,
    receptor: PlanarPoint,
) -> f64 {
    let dx = receptor.x - source.position.x;
    let dy = receptor.y - source.position.y;
    let (downwind, crosswind) = frame.rotate(dx, dy);
    if downwind <= 0.0 {
        return 0.0;
    }

    let (sigma_y, sigma_z) = dispersion_coefficients(downwind);
    if sigma_y == 0.0 || sigma_z == 0.0 {
        return 0.0;
    }

    let lateral = (-0.5 * (crosswind / sigma_y).powi(2)).exp();
    let vertical = (-0.5 * (constants::RECEPTOR_HEIGHT / sigma_z).powi(2)).exp();
    *source.q / (2.0 * PI * frame.speed() * sigma_y * sigma_z) * lateral * vertical
}

/// Accumulate every source's plume into the grid's running totals.
pub fn accumulate(grid: &mut SamplingGrid, sources: &[EmissionSource], wind: &WindState) {
    let frame = WindFrame::new(wind);
    debug!(
        sources = sources.len(),
        cells = grid.len(),
        wind_speed = *wind.speed(),
        wind_direction = *wind.direction(),
        "accumulating plume contributions"
    );
    grid.update_cells(|point, value| {
        let total: f64 = sources
            .iter()
            .map(|source| concentration_at(source, &frame, point))
            .sum();
        value + total
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::GramsPerSecond;
    use approx::assert_relative_eq;

    fn source(q: f64, x: f64, y: f64) -> EmissionSource {
        EmissionSource {
            q: GramsPerSecond::new(q),
            position: PlanarPoint::new(x, y),
        }
    }

    #[test]
    fn test_rotation_at_zero_degrees_is_identity() {
        let frame = WindFrame::new(&WindState::new(2.0, 0.0));
        let (downwind, crosswind) = frame.rotate(100.0, -40.0);
        assert_relative_eq!(downwind, 100.0);
        assert_relative_eq!(crosswind, -40.0);
    }

    #[test]
    fn test_downwind_receptor_positive_upwind_zero() {
        let src = source(1.0, 0.0, 0.0);
        let frame = WindFrame::new(&WindState::new(2.0, 0.0));
        assert!(concentration_at(&src, &frame, PlanarPoint::new(100.0, 0.0)) > 0.0);
        assert_eq!(
            concentration_at(&src, &frame, PlanarPoint::new(-100.0, 0.0)),
            0.0
        );
    }

    #[test]
    fn test_receptor_on_source_is_zero() {
        let src = source(1.0, 50.0, 50.0);
        let frame = WindFrame::new(&WindState::new(2.0, 0.0));
        assert_eq!(
            concentration_at(&src, &frame, PlanarPoint::new(50.0, 50.0)),
            0.0
        );
    }

    #[test]
    fn test_concentration_matches_closed_form() {
        let src = source(1.0, 0.0, 0.0);
        let frame = WindFrame::new(&WindState::new(2.0, 0.0));
        let rx: f64 = 100.0;
        let sigma_y = 0.22 * rx / (1.0 + 0.0004 * rx).sqrt();
        let sigma_z = 0.20 * rx;
        let expected = 1.0 / (2.0 * PI * 2.0 * sigma_y * sigma_z)
            * (-0.5 * (1.5 / sigma_z).powi(2)).exp();
        let actual = concentration_at(&src, &frame, PlanarPoint::new(rx, 0.0));
        assert_relative_eq!(actual, expected, epsilon = 1e-15);
    }

    #[test]
    fn test_crosswind_offset_attenuates() {
        let src = source(1.0, 0.0, 0.0);
        let frame = WindFrame::new(&WindState::new(2.0, 0.0));
        let centerline = concentration_at(&src, &frame, PlanarPoint::new(200.0, 0.0));
        let offset = concentration_at(&src, &frame, PlanarPoint::new(200.0, 60.0));
        assert!(offset < centerline);
        assert!(offset > 0.0);
    }

    #[test]
    fn test_faster_wind_dilutes() {
        let src = source(1.0, 0.0, 0.0);
        let slow = WindFrame::new(&WindState::new(1.0, 0.0));
        let fast = WindFrame::new(&WindState::new(4.0, 0.0));
        let receptor = PlanarPoint::new(150.0, 0.0);
        assert!(
            concentration_at(&src, &fast, receptor)
                < concentration_at(&src, &slow, receptor)
        );
    }
}
