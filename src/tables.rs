//! Readers for whitespace-separated input tables and JSON truss models.
//!
//! Every table starts with a single header line that is skipped. Blank lines
//! are ignored. Any malformed row fails the whole read with its line number.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::airfoil::Airfoil;
use crate::errors::TableError;
use crate::geometry::{Point, Support};
use crate::truss::{build_geometry, BeamRecord, JointRecord, TrussGeometry};

/// Name of the panel coordinate table inside an airfoil directory.
pub const XY_FILE: &str = "xy.dat";

/// Joint and beam records of a truss, as stored in a JSON model file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrussModel {
    /// Joint records in id order.
    pub joints: Vec<JointRecord>,
    /// Beam records in any order.
    #[serde(default)]
    pub beams: Vec<BeamRecord>,
}

impl TrussModel {
    /// Validate the records into a [`TrussGeometry`].
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Geometry`] when the records are inconsistent.
    pub fn build(&self) -> Result<TrussGeometry, TableError> {
        Ok(build_geometry(&self.joints, &self.beams)?)
    }
}

/// Pressure distribution measured at one angle of attack.
#[derive(Clone, Debug, PartialEq)]
pub struct AirfoilCase {
    /// Angle of attack in degrees.
    pub alpha: f64,
    /// One pressure coefficient per panel.
    pub pressure: Vec<f64>,
}

/// Airfoil outline together with its pressure measurements.
#[derive(Clone, Debug, PartialEq)]
pub struct AirfoilData {
    /// Label derived from the directory name.
    pub name: String,
    /// Panel outline.
    pub airfoil: Airfoil,
    /// Cases sorted by increasing angle of attack.
    pub cases: Vec<AirfoilCase>,
}

/// Iterate over `(line number, fields)` for every data row of a table.
fn data_rows(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> + '_ {
    text.lines()
        .enumerate()
        .skip(1)
        .map(|(index, line)| (index + 1, line.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, fields)| !fields.is_empty())
}

/// Require exactly `expected` fields on a row.
fn expect_fields(line: usize, fields: &[&str], expected: usize) -> Result<(), TableError> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(TableError::parse(
            line,
            format!("expected {expected} columns, found {}", fields.len()),
        ))
    }
}

/// Parse a real-valued field.
fn parse_real(line: usize, name: &str, field: &str) -> Result<f64, TableError> {
    field
        .parse::<f64>()
        .map_err(|_| TableError::parse(line, format!("{name} `{field}` is not a number")))
}

/// Parse a non-negative integer field, accepting integral decimals such as `3.0`.
fn parse_index(line: usize, name: &str, field: &str) -> Result<usize, TableError> {
    if let Ok(value) = field.parse::<usize>() {
        return Ok(value);
    }
    match field.parse::<f64>() {
        Ok(value) if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 => {
            Ok(value as usize)
        }
        _ => Err(TableError::parse(
            line,
            format!("{name} `{field}` is not a non-negative integer"),
        )),
    }
}

/// Parse a joint table with rows `id x y fx fy supported`.
///
/// # Errors
///
/// Returns [`TableError::Parse`] for rows with the wrong number of columns,
/// non-numeric values, or a support flag other than `0` or `1`.
///
/// # Examples
/// ```
/// use trussforce::{parse_joint_table, Support};
///
/// let joints = parse_joint_table("Joint X Y Fx Fy Support\n1 0 0 0 0 1\n2 1 0 -10 0 0\n")
///     .expect("well-formed table");
/// assert_eq!(joints.len(), 2);
/// assert_eq!(joints[0].support, Support::PINNED);
/// assert_eq!(joints[1].force_x, -10.0);
/// ```
pub fn parse_joint_table(text: &str) -> Result<Vec<JointRecord>, TableError> {
    data_rows(text)
        .map(|(line, fields)| {
            expect_fields(line, &fields, 6)?;
            let support = match parse_index(line, "support flag", fields[5])? {
                0 => Support::FREE,
                1 => Support::PINNED,
                other => {
                    return Err(TableError::parse(
                        line,
                        format!("support flag must be 0 or 1, found {other}"),
                    ))
                }
            };
            Ok(JointRecord {
                id: parse_index(line, "joint id", fields[0])?,
                x: parse_real(line, "x", fields[1])?,
                y: parse_real(line, "y", fields[2])?,
                force_x: parse_real(line, "fx", fields[3])?,
                force_y: parse_real(line, "fy", fields[4])?,
                support,
            })
        })
        .collect()
}

/// Parse a beam table with rows `id joint_a joint_b`.
///
/// # Errors
///
/// Returns [`TableError::Parse`] for malformed rows.
pub fn parse_beam_table(text: &str) -> Result<Vec<BeamRecord>, TableError> {
    data_rows(text)
        .map(|(line, fields)| {
            expect_fields(line, &fields, 3)?;
            Ok(BeamRecord::new(
                parse_index(line, "beam id", fields[0])?,
                parse_index(line, "joint", fields[1])?,
                parse_index(line, "joint", fields[2])?,
            ))
        })
        .collect()
}

/// Parse a panel coordinate table with rows `x y`.
///
/// # Errors
///
/// Returns [`TableError::Parse`] for malformed rows.
pub fn parse_xy_table(text: &str) -> Result<Vec<Point>, TableError> {
    data_rows(text)
        .map(|(line, fields)| {
            expect_fields(line, &fields, 2)?;
            Ok(Point::new(
                parse_real(line, "x", fields[0])?,
                parse_real(line, "y", fields[1])?,
            ))
        })
        .collect()
}

/// Parse a pressure coefficient table with one value per row.
///
/// # Errors
///
/// Returns [`TableError::Parse`] for malformed rows.
pub fn parse_pressure_table(text: &str) -> Result<Vec<f64>, TableError> {
    data_rows(text)
        .map(|(line, fields)| {
            expect_fields(line, &fields, 1)?;
            parse_real(line, "pressure coefficient", fields[0])
        })
        .collect()
}

/// Decode a JSON truss model.
///
/// # Errors
///
/// Returns [`TableError::Json`] when the document does not match [`TrussModel`].
pub fn parse_model_json(text: &str) -> Result<TrussModel, TableError> {
    Ok(serde_json::from_str(text)?)
}

/// Read a whole file, attaching the path to any failure.
fn read_text(path: &Path) -> Result<String, TableError> {
    fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Attach the file name to a parse failure so line numbers stay meaningful.
fn in_file<T>(path: &Path, result: Result<T, TableError>) -> Result<T, TableError> {
    result.map_err(|error| match error {
        TableError::Parse { line, message } => TableError::Parse {
            line,
            message: format!("{}: {message}", path.display()),
        },
        other => other,
    })
}

/// Read and validate a truss from a joint table and a beam table.
///
/// # Errors
///
/// Returns [`TableError`] for unreadable files, malformed rows or records that
/// do not describe a valid truss.
pub fn read_truss(
    joints: impl AsRef<Path>,
    beams: impl AsRef<Path>,
) -> Result<TrussGeometry, TableError> {
    let joints_path = joints.as_ref();
    let beams_path = beams.as_ref();
    let joints = in_file(joints_path, parse_joint_table(&read_text(joints_path)?))?;
    let beams = in_file(beams_path, parse_beam_table(&read_text(beams_path)?))?;
    debug!(
        "read {} joints from {} and {} beams from {}",
        joints.len(),
        joints_path.display(),
        beams.len(),
        beams_path.display()
    );
    Ok(build_geometry(&joints, &beams)?)
}

/// Read and validate a truss from a JSON model file.
///
/// # Errors
///
/// Returns [`TableError`] for unreadable files, invalid JSON or inconsistent
/// records.
pub fn read_model(path: impl AsRef<Path>) -> Result<TrussGeometry, TableError> {
    parse_model_json(&read_text(path.as_ref())?)?.build()
}

/// Extract the angle of attack from a file named like `alpha+2.5.dat`.
fn alpha_from_file_name(name: &str) -> Option<f64> {
    name.strip_prefix("alpha")?
        .strip_suffix(".dat")?
        .parse::<f64>()
        .ok()
}

/// Derive a display label from an airfoil directory such as `naca0012`.
fn airfoil_name(dir: &Path) -> String {
    let name = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("naca") => name[4..].to_string(),
        _ => name,
    }
}

/// Read an airfoil directory holding `xy.dat` and one `alpha<angle>.dat` per case.
///
/// # Errors
///
/// Returns [`TableError`] when a file cannot be read or parsed, when no
/// pressure files are present, or when the outline is not a valid airfoil.
pub fn read_airfoil_dir(dir: impl AsRef<Path>) -> Result<AirfoilData, TableError> {
    let dir = dir.as_ref();
    let xy_path = dir.join(XY_FILE);
    let airfoil = Airfoil::new(in_file(&xy_path, parse_xy_table(&read_text(&xy_path)?))?)?;

    let entries = fs::read_dir(dir).map_err(|source| TableError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut files: Vec<(f64, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| TableError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name();
        if let Some(alpha) = alpha_from_file_name(&name.to_string_lossy()) {
            files.push((alpha, entry.path()));
        }
    }
    if files.is_empty() {
        return Err(TableError::MissingData {
            path: dir.to_path_buf(),
            message: "no alpha<angle>.dat pressure files found".to_string(),
        });
    }
    files.sort_by(|a, b| a.0.total_cmp(&b.0));

    let cases = files
        .into_iter()
        .map(|(alpha, path)| {
            let pressure = in_file(&path, parse_pressure_table(&read_text(&path)?))?;
            Ok(AirfoilCase { alpha, pressure })
        })
        .collect::<Result<Vec<_>, TableError>>()?;
    debug!(
        "read {} panels and {} pressure cases from {}",
        airfoil.panel_count(),
        cases.len(),
        dir.display()
    );

    Ok(AirfoilData {
        name: airfoil_name(dir),
        airfoil,
        cases,
    })
}
