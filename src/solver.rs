//! Linear solvers for the square equilibrium system.

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

/// Tunable limits for the equilibrium solve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Pivots smaller than this fraction of the largest pivot count as zero.
    pub pivot_tolerance: f64,
    /// Largest number of unknowns accepted before allocating the dense matrix.
    pub max_unknowns: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            pivot_tolerance: 1.0e-10,
            max_unknowns: 2_000,
        }
    }
}

impl SolverOptions {
    /// Check that the options describe a usable solver.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidPivotTolerance`] unless the tolerance is
    /// finite and strictly between 0 and 1.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let tolerance = self.pivot_tolerance;
        if tolerance.is_finite() && tolerance > 0.0 && tolerance < 1.0 {
            Ok(())
        } else {
            Err(AnalysisError::InvalidPivotTolerance { tolerance })
        }
    }
}

/// Strategy for solving `A·f = b` on a square system.
pub trait LinearSolver {
    /// Solve the system, returning one value per column of `matrix`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::SingularSystem`] when the matrix has no unique
    /// solution.
    fn solve(
        &self,
        matrix: DMatrix<f64>,
        rhs: &DVector<f64>,
    ) -> Result<DVector<f64>, AnalysisError>;
}

/// Dense LU factorisation with full pivoting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DenseLuSolver {
    /// Relative threshold below which a pivot is treated as zero.
    pivot_tolerance: f64,
}

impl DenseLuSolver {
    /// Create a solver using the pivot tolerance from `options`.
    #[must_use]
    pub fn new(options: &SolverOptions) -> Self {
        Self {
            pivot_tolerance: options.pivot_tolerance,
        }
    }
}

impl Default for DenseLuSolver {
    fn default() -> Self {
        Self::new(&SolverOptions::default())
    }
}

impl LinearSolver for DenseLuSolver {
    fn solve(
        &self,
        matrix: DMatrix<f64>,
        rhs: &DVector<f64>,
    ) -> Result<DVector<f64>, AnalysisError> {
        let size = matrix.nrows();
        if size == 0 {
            return Ok(DVector::zeros(0));
        }

        let lu = matrix.full_piv_lu();
        let pivots = lu.u().diagonal().map(f64::abs);
        let largest = pivots.max();
        let threshold = largest * self.pivot_tolerance;
        let rank = pivots.iter().filter(|pivot| **pivot > threshold).count();
        debug!(
            "LU pivots: largest {:.3e}, smallest {:.3e}, rank {} of {}",
            largest,
            pivots.min(),
            rank,
            size
        );
        if largest == 0.0 || rank < size {
            return Err(AnalysisError::SingularSystem { size, rank });
        }

        let solution = lu
            .solve(rhs)
            .ok_or(AnalysisError::SingularSystem { size, rank })?;
        if solution.iter().any(|value| !value.is_finite()) {
            warn!("LU back-substitution produced non-finite values");
            return Err(AnalysisError::SingularSystem { size, rank });
        }
        Ok(solution)
    }
}
