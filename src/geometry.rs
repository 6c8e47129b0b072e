//! Fundamental geometric types for planar truss modelling.

use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Position in the plane of the truss.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Return `true` when both coordinates are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

/// Planar force vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Force {
    /// Force component acting along the global X axis.
    pub x: f64,
    /// Force component acting along the global Y axis.
    pub y: f64,
}

impl Force {
    /// Create a [`Force`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component of the force along `axis`.
    #[must_use]
    pub const fn component(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Return `true` when both components are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One of the two global axes of the plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl Axis {
    /// Both axes in equation order.
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// Offset of this axis within a joint's pair of equilibrium rows.
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.pad("x"),
            Axis::Y => f.pad("y"),
        }
    }
}

/// Translational restraints provided at a joint.
///
/// Each restrained axis introduces one unknown reaction component into the
/// equilibrium system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    /// The joint cannot translate along X.
    pub x: bool,
    /// The joint cannot translate along Y.
    pub y: bool,
}

impl Support {
    /// No restraint.
    pub const FREE: Support = Support::new(false, false);
    /// Pin support restraining both axes.
    pub const PINNED: Support = Support::new(true, true);
    /// Roller restraining only the X axis.
    pub const ROLLER_X: Support = Support::new(true, false);
    /// Roller restraining only the Y axis.
    pub const ROLLER_Y: Support = Support::new(false, true);

    /// Create a [`Support`] with explicit per-axis restraints.
    #[must_use]
    pub const fn new(x: bool, y: bool) -> Self {
        Self { x, y }
    }

    /// Map the tabular `0|1` support flag onto a restraint.
    ///
    /// # Examples
    /// ```
    /// use trussforce::Support;
    ///
    /// assert_eq!(Support::from_flag(true), Support::PINNED);
    /// assert_eq!(Support::from_flag(false), Support::FREE);
    /// ```
    #[must_use]
    pub const fn from_flag(is_supported: bool) -> Self {
        if is_supported {
            Self::PINNED
        } else {
            Self::FREE
        }
    }

    /// Whether the joint is restrained along `axis`.
    #[must_use]
    pub const fn restrains(self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Number of reaction unknowns this support contributes.
    #[must_use]
    pub fn reaction_count(self) -> usize {
        usize::from(self.x) + usize::from(self.y)
    }

    /// Restrained axes in equation order.
    pub fn restrained_axes(self) -> impl Iterator<Item = Axis> {
        Axis::ALL.into_iter().filter(move |axis| self.restrains(*axis))
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use trussforce::point;
///
/// let origin = point(0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Convenience helper for creating [`Force`] instances.
///
/// # Examples
/// ```
/// use trussforce::force;
///
/// let load = force(1.0, -5.0);
/// assert_eq!(load.y, -5.0);
/// ```
#[must_use]
pub const fn force(x: f64, y: f64) -> Force {
    Force::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_to_vector_roundtrip() {
        let origin = Point::new(1.0, 2.0);
        let vector = origin.to_vector();
        assert_eq!(vector, Vector2::new(1.0, 2.0));
        assert_eq!(Point::from(vector), origin);
    }

    #[test]
    fn force_defaults_to_zero() {
        assert_eq!(Force::default(), Force::new(0.0, 0.0));
        assert_eq!(force(3.0, -4.0).component(Axis::Y), -4.0);
    }

    #[test]
    fn support_counts_reactions_per_axis() {
        assert_eq!(Support::FREE.reaction_count(), 0);
        assert_eq!(Support::ROLLER_Y.reaction_count(), 1);
        assert_eq!(Support::PINNED.reaction_count(), 2);
        let axes: Vec<Axis> = Support::ROLLER_Y.restrained_axes().collect();
        assert_eq!(axes, vec![Axis::Y]);
    }

    #[test]
    fn non_finite_values_are_detected() {
        assert!(!point(f64::NAN, 0.0).is_finite());
        assert!(!force(0.0, f64::INFINITY).is_finite());
        assert!(point(1.0, -1.0).is_finite());
    }
}
