mod cli;
mod report;

use anyhow::Context;
use cli::{Command, OutputOptions};
use log::LevelFilter;
use report::{render_airfoil, render_forces, render_reactions};
use trussforce::{analyze, read_airfoil_dir, read_model, read_truss, SolverOptions, TrussGeometry};

fn main() -> anyhow::Result<()> {
    let cli = cli::parse();

    let default_level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    match cli.command {
        Command::Truss {
            joints,
            beams,
            output,
            solver,
        } => {
            // A parse failure in either table aborts before any solve.
            let truss = read_truss(&joints, &beams).with_context(|| {
                format!(
                    "loading truss from {} and {}",
                    joints.display(),
                    beams.display()
                )
            })?;
            solve_and_print(&truss, &solver.options(), &output)
        }
        Command::Model {
            model,
            output,
            solver,
        } => {
            let truss = read_model(&model)
                .with_context(|| format!("loading truss model {}", model.display()))?;
            solve_and_print(&truss, &solver.options(), &output)
        }
        Command::Airfoil { dir } => {
            let data = read_airfoil_dir(&dir)
                .with_context(|| format!("loading airfoil data from {}", dir.display()))?;
            let report = render_airfoil(&data)
                .with_context(|| format!("analysing airfoil {}", data.name))?;
            print!("{report}");
            Ok(())
        }
    }
}

/// Solve the truss and print the requested tables or JSON document.
fn solve_and_print(
    truss: &TrussGeometry,
    options: &SolverOptions,
    output: &OutputOptions,
) -> anyhow::Result<()> {
    let solution = analyze(truss, options).context("solving joint equilibrium")?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
        return Ok(());
    }

    print!("{}", render_forces(&solution));
    if output.reactions {
        println!();
        print!("{}", render_reactions(&solution));
    }
    Ok(())
}
