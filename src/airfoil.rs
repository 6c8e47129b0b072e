//! Lift coefficient and stagnation point of an airfoil from panel pressure data.
//!
//! The surface is described by an ordered list of panel end points; panel `i`
//! runs from point `i` to point `i + 1` and carries one pressure coefficient.

use serde::Serialize;

use crate::errors::AirfoilError;
use crate::geometry::Point;

/// Airfoil outline made of straight panels.
#[derive(Clone, Debug, PartialEq)]
pub struct Airfoil {
    /// Panel end points in surface order.
    points: Vec<Point>,
    /// Distance from the leading edge to the trailing edge.
    chord: f64,
}

/// Location of zero local flow velocity, taken at the panel with the largest Cp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StagnationPoint {
    /// Midpoint of the panel.
    pub location: Point,
    /// Pressure coefficient on that panel.
    pub pressure_coefficient: f64,
}

impl Airfoil {
    /// Create an airfoil from ordered panel end points.
    ///
    /// # Errors
    ///
    /// Returns [`AirfoilError`] when fewer than two points are supplied, a point
    /// is not finite, or the chord is zero.
    ///
    /// # Examples
    /// ```
    /// use trussforce::{point, Airfoil};
    ///
    /// let plate = Airfoil::new(vec![point(1.0, 0.0), point(0.0, 0.0)]).expect("valid outline");
    /// assert_eq!(plate.chord(), 1.0);
    /// assert_eq!(plate.panel_count(), 1);
    /// ```
    pub fn new(points: Vec<Point>) -> Result<Self, AirfoilError> {
        if points.len() < 2 {
            return Err(AirfoilError::TooFewPoints(points.len()));
        }
        if let Some(index) = points.iter().position(|point| !point.is_finite()) {
            return Err(AirfoilError::NonFinitePoint(index));
        }
        let (min_x, max_x) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), point| {
                (low.min(point.x), high.max(point.x))
            });
        let chord = max_x - min_x;
        if chord <= 0.0 {
            return Err(AirfoilError::ZeroChord);
        }
        Ok(Self { points, chord })
    }

    /// Chord length.
    #[must_use]
    pub fn chord(&self) -> f64 {
        self.chord
    }

    /// Number of panels, one fewer than the number of points.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Panel end points in surface order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Lift coefficient at an angle of attack given in degrees.
    ///
    /// Pressure is integrated over every panel into chord-normalised force
    /// coefficients `cx` and `cy`, which are then rotated into the direction
    /// normal to the free stream.
    ///
    /// # Errors
    ///
    /// Returns [`AirfoilError`] when `pressure` does not hold one finite value
    /// per panel.
    pub fn lift_coefficient(
        &self,
        pressure: &[f64],
        alpha_degrees: f64,
    ) -> Result<f64, AirfoilError> {
        self.check_pressure(pressure)?;
        let (cx, cy) = self
            .points
            .windows(2)
            .zip(pressure)
            .fold((0.0, 0.0), |(cx, cy), (panel, cp)| {
                let dx = panel[1].x - panel[0].x;
                let dy = panel[1].y - panel[0].y;
                (cx - dy * cp / self.chord, cy + dx * cp / self.chord)
            });
        let alpha = alpha_degrees.to_radians();
        Ok(cy * alpha.cos() - cx * alpha.sin())
    }

    /// Stagnation point for a pressure distribution.
    ///
    /// Ties resolve to the first panel in surface order.
    ///
    /// # Errors
    ///
    /// Returns [`AirfoilError`] when `pressure` does not hold one finite value
    /// per panel.
    pub fn stagnation_point(&self, pressure: &[f64]) -> Result<StagnationPoint, AirfoilError> {
        self.check_pressure(pressure)?;
        let (index, pressure_coefficient) = pressure.iter().copied().enumerate().fold(
            (0, f64::NEG_INFINITY),
            |best, (index, cp)| if cp > best.1 { (index, cp) } else { best },
        );
        let start = self.points[index];
        let end = self.points[index + 1];
        Ok(StagnationPoint {
            location: Point::from((start.to_vector() + end.to_vector()) / 2.0),
            pressure_coefficient,
        })
    }

    /// Verify the pressure distribution matches the panels.
    fn check_pressure(&self, pressure: &[f64]) -> Result<(), AirfoilError> {
        if pressure.len() != self.panel_count() {
            return Err(AirfoilError::PressureCount {
                expected: self.panel_count(),
                received: pressure.len(),
            });
        }
        if let Some(index) = pressure.iter().position(|cp| !cp.is_finite()) {
            return Err(AirfoilError::NonFinitePressure(index));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::point;

    /// Diamond section traversed from the trailing edge over the top surface.
    fn diamond() -> Airfoil {
        Airfoil::new(vec![
            point(1.0, 0.0),
            point(0.5, 0.1),
            point(0.0, 0.0),
            point(0.5, -0.1),
            point(1.0, 0.0),
        ])
        .expect("valid diamond")
    }

    #[test]
    fn symmetric_pressure_gives_no_lift() {
        let airfoil = diamond();
        let cl = airfoil
            .lift_coefficient(&[-0.5, 0.3, 0.3, -0.5], 0.0)
            .expect("matching pressure");
        assert_relative_eq!(cl, 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn suction_on_upper_surface_produces_lift() {
        let airfoil = diamond();
        // Upper panels run towards the leading edge (dx < 0), so suction there
        // contributes positive cy.
        let cl = airfoil
            .lift_coefficient(&[-1.0, -1.0, 0.0, 0.0], 0.0)
            .expect("matching pressure");
        assert_relative_eq!(cl, 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn angle_of_attack_rotates_force_coefficients() {
        let plate = Airfoil::new(vec![point(1.0, 0.0), point(0.0, 0.0), point(0.0, -1.0)])
            .expect("valid outline");
        // Panel one contributes cy = 1, panel two contributes cx = 2.
        let cl = plate.lift_coefficient(&[-1.0, 2.0], 90.0).expect("matching pressure");
        assert_relative_eq!(cl, -2.0, epsilon = 1.0e-12);
        let cl = plate.lift_coefficient(&[-1.0, 2.0], 0.0).expect("matching pressure");
        assert_relative_eq!(cl, 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn stagnation_point_is_panel_midpoint_of_max_pressure() {
        let airfoil = diamond();
        let stagnation = airfoil
            .stagnation_point(&[-0.4, 0.9, 0.95, -0.2])
            .expect("matching pressure");
        assert_relative_eq!(stagnation.location.x, 0.25, epsilon = 1.0e-12);
        assert_relative_eq!(stagnation.location.y, -0.05, epsilon = 1.0e-12);
        assert_relative_eq!(stagnation.pressure_coefficient, 0.95, epsilon = 1.0e-12);

        let tie = airfoil.stagnation_point(&[1.0, 1.0, 0.0, 0.0]).expect("tie");
        assert_relative_eq!(tie.location.x, 0.75, epsilon = 1.0e-12);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert_eq!(
            Airfoil::new(vec![point(0.0, 0.0)]),
            Err(AirfoilError::TooFewPoints(1))
        );
        assert_eq!(
            Airfoil::new(vec![point(0.0, 0.0), point(0.0, 1.0)]),
            Err(AirfoilError::ZeroChord)
        );
        assert_eq!(
            Airfoil::new(vec![point(0.0, 0.0), point(f64::NAN, 1.0)]),
            Err(AirfoilError::NonFinitePoint(1))
        );

        let airfoil = diamond();
        assert_eq!(
            airfoil.lift_coefficient(&[0.0; 3], 0.0),
            Err(AirfoilError::PressureCount {
                expected: 4,
                received: 3
            })
        );
        assert_eq!(
            airfoil.stagnation_point(&[0.0, f64::NAN, 0.0, 0.0]),
            Err(AirfoilError::NonFinitePressure(1))
        );
    }
}
