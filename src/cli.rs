use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use trussforce::SolverOptions;

#[derive(Parser)]
#[command(
    name = "trussforce",
    about = "Truss equilibrium and airfoil lift analysis",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Print diagnostics (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Solve beam forces from a joint table and a beam table
    Truss {
        /// Joint table: `id x y fx fy supported` after one header line
        #[arg(value_name = "JOINTS")]
        joints: PathBuf,

        /// Beam table: `id joint_a joint_b` after one header line
        #[arg(value_name = "BEAMS")]
        beams: PathBuf,

        #[command(flatten)]
        output: OutputOptions,

        #[command(flatten)]
        solver: SolverArgs,
    },

    /// Solve beam forces from a JSON model file
    Model {
        /// JSON file with `joints` and `beams` arrays
        #[arg(value_name = "FILE")]
        model: PathBuf,

        #[command(flatten)]
        output: OutputOptions,

        #[command(flatten)]
        solver: SolverArgs,
    },

    /// Compute lift coefficients and stagnation points for an airfoil directory
    Airfoil {
        /// Directory holding `xy.dat` and `alpha<angle>.dat` files
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
}

/// Output options shared by the truss commands.
#[derive(Args)]
pub struct OutputOptions {
    /// Also list support reactions
    #[arg(short, long)]
    pub reactions: bool,

    /// Emit the full solution as JSON
    #[arg(long)]
    pub json: bool,
}

/// Solver limits shared by the truss commands.
#[derive(Args)]
#[command(next_help_heading = "Solver")]
pub struct SolverArgs {
    /// Relative pivot size below which the system counts as singular
    #[arg(long, value_name = "TOL")]
    pub pivot_tolerance: Option<f64>,

    /// Refuse systems with more unknowns than this
    #[arg(long, value_name = "N")]
    pub max_unknowns: Option<usize>,
}

impl SolverArgs {
    /// Apply the command-line overrides on top of the defaults.
    pub fn options(&self) -> SolverOptions {
        let defaults = SolverOptions::default();
        SolverOptions {
            pivot_tolerance: self.pivot_tolerance.unwrap_or(defaults.pivot_tolerance),
            max_unknowns: self.max_unknowns.unwrap_or(defaults.max_unknowns),
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
