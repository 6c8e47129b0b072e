use std::fmt::Write;

use trussforce::{AirfoilData, AirfoilError, TrussSolution};

/// Render the beam force table, tension positive.
#[must_use]
pub fn render_forces(solution: &TrussSolution) -> String {
    let mut output = String::new();
    output.push_str(" Beam       Force\n");
    output.push_str("-----------------\n");
    for entry in solution.beam_forces() {
        writeln!(&mut output, "{:>5}{:>12.3}", entry.beam, entry.force)
            .expect("writing to string cannot fail");
    }
    output
}

/// Render the support reaction table.
#[must_use]
pub fn render_reactions(solution: &TrussSolution) -> String {
    let mut output = String::new();
    output.push_str(" Joint  Axis    Reaction\n");
    output.push_str("------------------------\n");
    for entry in solution.reactions() {
        writeln!(
            &mut output,
            "{:>6}{:>6}{:>12.3}",
            entry.joint, entry.axis, entry.force
        )
        .expect("writing to string cannot fail");
    }
    output
}

/// Render lift coefficient and stagnation point for every angle of attack.
///
/// # Errors
///
/// Returns [`AirfoilError`] when a pressure file does not match the outline.
pub fn render_airfoil(data: &AirfoilData) -> Result<String, AirfoilError> {
    let mut output = String::new();
    writeln!(&mut output, "Test case: NACA {}\n", data.name).expect("writing to string cannot fail");
    output.push_str("  alpha     cl          stagnation pt\n");
    output.push_str("  -----  -------  --------------------------\n");
    for case in &data.cases {
        let cl = data.airfoil.lift_coefficient(&case.pressure, case.alpha)?;
        let stagnation = data.airfoil.stagnation_point(&case.pressure)?;
        writeln!(
            &mut output,
            "  {:>5.1}  {:>7.4}  ({:>7.4}, {:>7.4})  {:.4}",
            case.alpha,
            cl,
            stagnation.location.x,
            stagnation.location.y,
            stagnation.pressure_coefficient
        )
        .expect("writing to string cannot fail");
    }
    Ok(output)
}
