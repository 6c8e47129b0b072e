//! Error types produced while building, analysing or loading models.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when joint and beam records do not describe a valid truss.
///
/// # Examples
///
/// ```
/// use trussforce::{build_geometry, BeamRecord, GeometryError, JointRecord};
///
/// let joints = [
///     JointRecord::new(1, 0.0, 0.0, 0.0, 0.0, true),
///     JointRecord::new(2, 0.0, 0.0, 0.0, 0.0, false),
/// ];
/// let beams = [BeamRecord::new(1, 1, 2)];
/// let error = build_geometry(&joints, &beams).expect_err("coincident joints rejected");
/// assert_eq!(error, GeometryError::ZeroLengthBeam { beam: 1 });
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Returned when no joints were supplied.
    #[error("truss has no joints")]
    Empty,
    /// Returned when a joint coordinate or load is NaN or infinite.
    #[error("joint {joint} has a non-finite coordinate or load")]
    NonFiniteJoint {
        /// Identifier of the offending joint.
        joint: usize,
    },
    /// Returned when the same joint id appears twice.
    #[error("joint {joint} is defined more than once")]
    DuplicateJoint {
        /// Repeated joint identifier.
        joint: usize,
    },
    /// Returned when joint ids do not run 1..N in row order.
    #[error("joint in row {row} has id {joint}; ids must run 1..N in row order")]
    NonContiguousJoint {
        /// One-based position of the record in the joint table.
        row: usize,
        /// Identifier found at that position.
        joint: usize,
    },
    /// Returned when the same beam id appears twice.
    #[error("beam {beam} is defined more than once")]
    DuplicateBeam {
        /// Repeated beam identifier.
        beam: usize,
    },
    /// Returned when a beam references a joint that does not exist.
    #[error("beam {beam} references missing joint {joint}")]
    UnknownJoint {
        /// Identifier of the offending beam.
        beam: usize,
        /// Joint identifier that could not be resolved.
        joint: usize,
    },
    /// Returned when both ends of a beam reference the same joint.
    #[error("beam {beam} connects joint {joint} to itself")]
    SelfConnectedBeam {
        /// Identifier of the offending beam.
        beam: usize,
        /// Joint referenced at both ends.
        joint: usize,
    },
    /// Returned when the two joints of a beam share the same coordinates.
    #[error("beam {beam} has zero length")]
    ZeroLengthBeam {
        /// Identifier of the offending beam.
        beam: usize,
    },
}

/// Error returned when a truss analysis fails.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when the number of equilibrium equations differs from the number
    /// of unknown forces.
    #[error(
        "truss is not statically determinate: {rows} equilibrium equations for {columns} unknown forces"
    )]
    NotStaticallyDeterminate {
        /// Number of equilibrium equations (two per joint).
        rows: usize,
        /// Number of unknowns (beam forces plus reaction components).
        columns: usize,
    },
    /// Returned when the equilibrium matrix is singular or numerically unstable.
    #[error("equilibrium system is singular (rank {rank} of {size}); check supports and connectivity")]
    SingularSystem {
        /// Dimension of the square system.
        size: usize,
        /// Numerical rank found during factorisation.
        rank: usize,
    },
    /// Returned when the system exceeds the configured size limit.
    #[error("equilibrium system has {unknowns} unknowns, above the limit of {limit}")]
    SystemTooLarge {
        /// Number of unknowns in the assembled system.
        unknowns: usize,
        /// Configured upper bound.
        limit: usize,
    },
    /// Returned when the pivot tolerance is not a finite value in `(0, 1)`.
    #[error("pivot tolerance {tolerance} must be a finite value between 0 and 1")]
    InvalidPivotTolerance {
        /// Rejected tolerance.
        tolerance: f64,
    },
}

/// Error returned while reading input tables or model files.
#[derive(Debug, Error)]
pub enum TableError {
    /// Returned when a file cannot be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when a table row cannot be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// One-based line number in the source text.
        line: usize,
        /// Description of the problem.
        message: String,
    },
    /// Returned when a JSON model cannot be decoded.
    #[error("invalid JSON model: {0}")]
    Json(#[from] serde_json::Error),
    /// Returned when parsed records do not form a valid truss.
    #[error("invalid geometry: {0}")]
    Geometry(#[from] GeometryError),
    /// Returned when parsed panel data do not form a valid airfoil.
    #[error("invalid airfoil: {0}")]
    Airfoil(#[from] AirfoilError),
    /// Returned when an airfoil directory lacks required files.
    #[error("airfoil data in {} is incomplete: {message}", path.display())]
    MissingData {
        /// Directory being loaded.
        path: PathBuf,
        /// Description of what is missing.
        message: String,
    },
}

impl TableError {
    /// Build a [`TableError::Parse`] for the given line.
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Error returned by the airfoil calculations.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AirfoilError {
    /// Returned when fewer than two panel points are supplied.
    #[error("an airfoil needs at least two panel points (received {0})")]
    TooFewPoints(usize),
    /// Returned when the panel points span no horizontal distance.
    #[error("airfoil chord length must be positive")]
    ZeroChord,
    /// Returned when a panel coordinate is NaN or infinite.
    #[error("panel point {0} has a non-finite coordinate")]
    NonFinitePoint(usize),
    /// Returned when the pressure distribution does not match the panels.
    #[error("expected {expected} pressure coefficients (one per panel), received {received}")]
    PressureCount {
        /// Number of panels on the airfoil.
        expected: usize,
        /// Number of coefficients supplied.
        received: usize,
    },
    /// Returned when a pressure coefficient is NaN or infinite.
    #[error("pressure coefficient {0} is not finite")]
    NonFinitePressure(usize),
}
