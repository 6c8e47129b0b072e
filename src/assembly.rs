//! Assembly of the joint force-balance equations `A·f = b`.
//!
//! Row `2·(j − 1) + axis` balances joint `j` along `axis`. Columns hold one
//! axial force per beam in beam-id order, followed by one reaction component
//! per restrained axis in joint order. A positive beam force is tension: the
//! beam pulls each of its joints toward the other end.

use log::debug;
use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CooMatrix;
use serde::Serialize;

use crate::geometry::Axis;
use crate::truss::TrussGeometry;

/// Quantity solved for in one column of the equilibrium system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Unknown {
    /// Axial force carried by a beam.
    BeamForce {
        /// Beam identifier.
        beam: usize,
    },
    /// Reaction component supplied by a support.
    Reaction {
        /// Supported joint identifier.
        joint: usize,
        /// Axis of the reaction component.
        axis: Axis,
    },
}

/// Linear system encoding static equilibrium at every joint.
#[derive(Clone, Debug)]
pub struct EquilibriumSystem {
    /// Sparse coefficient matrix `A`.
    coefficients: CooMatrix<f64>,
    /// Right-hand side `b`, the negated external loads.
    rhs: DVector<f64>,
    /// Label for each column of `A`.
    unknowns: Vec<Unknown>,
    /// Number of leading columns that hold beam forces.
    beam_count: usize,
}

/// Row of the equation balancing `joint` along `axis`.
fn row_index(joint: usize, axis: Axis) -> usize {
    2 * (joint - 1) + axis.offset()
}

impl EquilibriumSystem {
    /// Build the equilibrium system for a validated truss.
    ///
    /// # Examples
    /// ```
    /// use trussforce::{build_geometry, BeamRecord, EquilibriumSystem, JointRecord};
    ///
    /// let joints = [
    ///     JointRecord::new(1, 0.0, 0.0, 0.0, 0.0, true),
    ///     JointRecord::new(2, 1.0, 0.0, -10.0, 0.0, false),
    /// ];
    /// let truss = build_geometry(&joints, &[BeamRecord::new(1, 1, 2)]).expect("valid truss");
    /// let system = EquilibriumSystem::assemble(&truss);
    /// assert_eq!((system.rows(), system.columns()), (4, 3));
    /// ```
    #[must_use]
    pub fn assemble(truss: &TrussGeometry) -> Self {
        let unknowns = enumerate_unknowns(truss);
        let rows = 2 * truss.joint_count();
        let entries = coefficient_entries(truss, &unknowns);

        let mut coefficients = CooMatrix::new(rows, unknowns.len());
        for (row, column, value) in entries {
            coefficients.push(row, column, value);
        }

        let rhs = DVector::from_iterator(
            rows,
            truss
                .joints()
                .flat_map(|joint| Axis::ALL.map(|axis| -joint.load().component(axis))),
        );

        debug!(
            "assembled {}x{} equilibrium system ({} non-zero coefficients)",
            rows,
            unknowns.len(),
            coefficients.nnz()
        );

        Self {
            coefficients,
            rhs,
            unknowns,
            beam_count: truss.beam_count(),
        }
    }

    /// Number of equilibrium equations.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.coefficients.nrows()
    }

    /// Number of unknowns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.coefficients.ncols()
    }

    /// Number of leading columns that hold beam forces.
    #[must_use]
    pub fn beam_count(&self) -> usize {
        self.beam_count
    }

    /// Column labels in solution order.
    #[must_use]
    pub fn unknowns(&self) -> &[Unknown] {
        &self.unknowns
    }

    /// Sparse coefficient matrix.
    #[must_use]
    pub fn coefficients(&self) -> &CooMatrix<f64> {
        &self.coefficients
    }

    /// Right-hand side vector.
    #[must_use]
    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    /// Dense copy of the coefficient matrix.
    #[must_use]
    pub fn dense(&self) -> DMatrix<f64> {
        DMatrix::from(&self.coefficients)
    }

    /// Largest absolute entry of `A·f − b`.
    ///
    /// # Panics
    ///
    /// Panics when `solution` does not have one entry per column.
    #[must_use]
    pub fn residual(&self, solution: &DVector<f64>) -> f64 {
        (self.dense() * solution - &self.rhs).amax()
    }
}

/// Enumerate the columns: every beam, then every restrained support axis.
fn enumerate_unknowns(truss: &TrussGeometry) -> Vec<Unknown> {
    let beams = truss
        .beams()
        .map(|beam| Unknown::BeamForce { beam: beam.id() });
    let reactions = truss.joints().flat_map(|joint| {
        let id = joint.id();
        joint
            .support()
            .restrained_axes()
            .map(move |axis| Unknown::Reaction { joint: id, axis })
    });
    beams.chain(reactions).collect()
}

/// Produce every `(row, column, value)` triplet of the coefficient matrix.
fn coefficient_entries(truss: &TrussGeometry, unknowns: &[Unknown]) -> Vec<(usize, usize, f64)> {
    let beam_entries = truss.beams().enumerate().flat_map(|(column, beam)| {
        let (start, end) = beam.joints();
        let toward_end = beam.direction();
        let toward_start = -toward_end;
        [(start, toward_end), (end, toward_start)]
            .into_iter()
            .flat_map(move |(joint, unit)| {
                Axis::ALL
                    .into_iter()
                    .map(move |axis| (row_index(joint, axis), column, unit[axis.offset()]))
            })
    });

    let reaction_entries = unknowns
        .iter()
        .enumerate()
        .filter_map(|(column, unknown)| match *unknown {
            Unknown::Reaction { joint, axis } => Some((row_index(joint, axis), column, 1.0)),
            Unknown::BeamForce { .. } => None,
        });

    beam_entries
        .chain(reaction_entries)
        .filter(|(_, _, value)| *value != 0.0)
        .collect()
}
