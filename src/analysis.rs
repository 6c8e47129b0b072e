//! Static equilibrium analysis of a validated truss.

use log::{info, warn};
use nalgebra::DVector;
use serde::Serialize;

use crate::assembly::{EquilibriumSystem, Unknown};
use crate::determinacy::check_determinacy;
use crate::errors::AnalysisError;
use crate::geometry::Axis;
use crate::solver::{DenseLuSolver, LinearSolver, SolverOptions};
use crate::truss::TrussGeometry;

/// Residual above this fraction of the largest load is reported as suspicious.
const RESIDUAL_WARNING: f64 = 1.0e-6;

/// Axial force solved for one beam. Positive values are tension.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BeamForce {
    /// Beam identifier.
    pub beam: usize,
    /// Axial force; tension is positive.
    pub force: f64,
}

/// Reaction component supplied by a support.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Reaction {
    /// Supported joint identifier.
    pub joint: usize,
    /// Axis of the component.
    pub axis: Axis,
    /// Signed magnitude along `axis`.
    pub force: f64,
}

/// Beam forces and support reactions that keep every joint in equilibrium.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrussSolution {
    /// Beam forces in beam-id order.
    beam_forces: Vec<BeamForce>,
    /// Reaction components in joint order, X before Y.
    reactions: Vec<Reaction>,
    /// Largest absolute entry of `A·f − b`.
    residual: f64,
}

impl TrussSolution {
    /// Beam forces in beam-id order.
    #[must_use]
    pub fn beam_forces(&self) -> &[BeamForce] {
        &self.beam_forces
    }

    /// Plain force values in beam-id order.
    #[must_use]
    pub fn forces(&self) -> Vec<f64> {
        self.beam_forces.iter().map(|entry| entry.force).collect()
    }

    /// Force in the beam with the given id.
    #[must_use]
    pub fn force(&self, beam: usize) -> Option<f64> {
        self.beam_forces
            .iter()
            .find(|entry| entry.beam == beam)
            .map(|entry| entry.force)
    }

    /// Reaction components in joint order.
    #[must_use]
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    /// Reaction at `joint` along `axis`, if that axis is restrained.
    #[must_use]
    pub fn reaction(&self, joint: usize, axis: Axis) -> Option<f64> {
        self.reactions
            .iter()
            .find(|entry| entry.joint == joint && entry.axis == axis)
            .map(|entry| entry.force)
    }

    /// Largest equilibrium imbalance left by the numerical solve.
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.residual
    }

    /// Split a raw solution vector according to the column labels.
    fn from_unknowns(unknowns: &[Unknown], values: &DVector<f64>, residual: f64) -> Self {
        let mut beam_forces = Vec::new();
        let mut reactions = Vec::new();
        for (unknown, &force) in unknowns.iter().zip(values.iter()) {
            match *unknown {
                Unknown::BeamForce { beam } => beam_forces.push(BeamForce { beam, force }),
                Unknown::Reaction { joint, axis } => reactions.push(Reaction { joint, axis, force }),
            }
        }
        Self {
            beam_forces,
            reactions,
            residual,
        }
    }
}

/// Solve for the axial force in every beam using default [`SolverOptions`].
///
/// Forces are returned in beam-id order; positive values are tension.
///
/// # Errors
///
/// Returns [`AnalysisError::NotStaticallyDeterminate`] when the equation and
/// unknown counts differ and [`AnalysisError::SingularSystem`] when the
/// geometry forms a mechanism.
///
/// # Examples
/// ```
/// use trussforce::{build_geometry, solve_forces, BeamRecord, JointRecord, Support};
///
/// let joints = [
///     JointRecord::new(1, 0.0, 0.0, 0.0, 0.0, true),
///     JointRecord::new(2, 1.0, 0.0, 10.0, 0.0, false).with_support(Support::ROLLER_Y),
/// ];
/// let truss = build_geometry(&joints, &[BeamRecord::new(1, 1, 2)]).expect("valid truss");
/// let forces = solve_forces(&truss).expect("determinate truss");
/// assert!((forces[0] - 10.0).abs() < 1.0e-9);
/// ```
pub fn solve_forces(truss: &TrussGeometry) -> Result<Vec<f64>, AnalysisError> {
    analyze(truss, &SolverOptions::default()).map(|solution| solution.forces())
}

/// Solve for beam forces and reactions with the default dense LU solver.
///
/// # Errors
///
/// See [`solve_forces`]; additionally returns [`AnalysisError::SystemTooLarge`]
/// when the system exceeds [`SolverOptions::max_unknowns`] and
/// [`AnalysisError::InvalidPivotTolerance`] when the options fail
/// [`SolverOptions::validate`].
pub fn analyze(
    truss: &TrussGeometry,
    options: &SolverOptions,
) -> Result<TrussSolution, AnalysisError> {
    analyze_with(truss, options, &DenseLuSolver::new(options))
}

/// Solve for beam forces and reactions with a caller-supplied solver.
///
/// # Errors
///
/// See [`analyze`].
pub fn analyze_with<S>(
    truss: &TrussGeometry,
    options: &SolverOptions,
    solver: &S,
) -> Result<TrussSolution, AnalysisError>
where
    S: LinearSolver + ?Sized,
{
    options.validate()?;
    let system = EquilibriumSystem::assemble(truss);
    check_determinacy(system.rows(), system.columns(), options)?;

    let values = solver
        .solve(system.dense(), system.rhs())
        .inspect_err(|_| {
            warn!(
                "equilibrium system is singular: {} connected component(s), isolated joints {:?}",
                truss.component_count(),
                truss.isolated_joints()
            );
        })?;

    let residual = system.residual(&values);
    let scale = system.rhs().amax().max(1.0);
    if residual > RESIDUAL_WARNING * scale {
        warn!("equilibrium residual {residual:.3e} is large relative to loads of {scale:.3e}");
    }
    info!(
        "solved truss with {} beams and {} reaction components (residual {:.3e})",
        system.beam_count(),
        system.columns() - system.beam_count(),
        residual
    );

    Ok(TrussSolution::from_unknowns(system.unknowns(), &values, residual))
}
