#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod airfoil;
pub mod analysis;
pub mod assembly;
pub mod determinacy;
pub mod errors;
pub mod geometry;
pub mod solver;
pub mod tables;
pub mod truss;

pub use airfoil::{Airfoil, StagnationPoint};
pub use analysis::{analyze, analyze_with, solve_forces, BeamForce, Reaction, TrussSolution};
pub use assembly::{EquilibriumSystem, Unknown};
pub use determinacy::check_determinacy;
pub use errors::{AirfoilError, AnalysisError, GeometryError, TableError};
pub use geometry::{force, point, Axis, Force, Point, Support};
pub use solver::{DenseLuSolver, LinearSolver, SolverOptions};
pub use tables::{
    parse_beam_table, parse_joint_table, parse_model_json, parse_pressure_table, parse_xy_table,
    read_airfoil_dir, read_model, read_truss, AirfoilCase, AirfoilData, TrussModel,
};
pub use truss::{build_geometry, Beam, BeamRecord, Joint, JointRecord, TrussGeometry};
