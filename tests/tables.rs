#![warn(clippy::pedantic)]

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use tempfile::TempDir;
use trussforce::{
    read_airfoil_dir, read_model, read_truss, solve_forces, GeometryError, TableError,
};

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("temporary file is writable");
}

#[test]
fn tables_on_disk_solve_like_records() {
    let dir = TempDir::new().expect("temporary directory");
    write(
        dir.path(),
        "joints.dat",
        "Joint  X  Y  Fx  Fy  Zero\n1 0.0 0.0 0.0 0.0 1\n2 4.0 0.0 0.0 0.0 1\n3 2.0 2.0 0.0 -100.0 0\n4 2.0 0.0 0.0 0.0 0\n",
    );
    write(
        dir.path(),
        "beams.dat",
        "Beam Ja Jb\n1 1 4\n2 4 2\n3 2 3\n4 3 1\n5 3 4\n",
    );

    let truss = read_truss(dir.path().join("joints.dat"), dir.path().join("beams.dat"))
        .expect("tables load");
    assert_eq!(truss.joint_count(), 4);

    // Eight equations: five beams plus two pins.
    let error = solve_forces(&truss).expect_err("over-constrained by pins");
    assert_eq!(
        error.to_string(),
        "truss is not statically determinate: 8 equilibrium equations for 9 unknown forces"
    );
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().expect("temporary directory");
    let error = read_truss(dir.path().join("absent.dat"), dir.path().join("beams.dat"))
        .expect_err("nothing to read");
    assert!(matches!(error, TableError::Io { .. }), "{error:?}");
}

#[test]
fn parse_failures_name_the_file_and_line() {
    let dir = TempDir::new().expect("temporary directory");
    write(dir.path(), "joints.dat", "header\n1 0 0 0 0 1\n2 1 0 x 0 0\n");
    write(dir.path(), "beams.dat", "header\n1 1 2\n");

    let error = read_truss(dir.path().join("joints.dat"), dir.path().join("beams.dat"))
        .expect_err("bad load value");
    let TableError::Parse { line, message } = error else {
        panic!("expected parse error, got {error:?}");
    };
    assert_eq!(line, 3);
    assert!(message.contains("joints.dat"), "{message}");
}

#[test]
fn geometry_errors_surface_through_the_reader() {
    let dir = TempDir::new().expect("temporary directory");
    write(dir.path(), "joints.dat", "header\n1 0 0 0 0 1\n2 1 0 0 0 0\n");
    write(dir.path(), "beams.dat", "header\n1 1 3\n");

    let error = read_truss(dir.path().join("joints.dat"), dir.path().join("beams.dat"))
        .expect_err("missing joint");
    assert!(matches!(
        error,
        TableError::Geometry(GeometryError::UnknownJoint { beam: 1, joint: 3 })
    ));
}

#[test]
fn json_model_file_is_read() {
    let dir = TempDir::new().expect("temporary directory");
    write(
        dir.path(),
        "truss.json",
        r#"{
            "joints": [
                { "id": 1, "x": 0.0, "y": 0.0, "support": { "x": true, "y": true } },
                { "id": 2, "x": 0.0, "y": 3.0, "force_y": 12.0, "support": { "x": true, "y": false } }
            ],
            "beams": [ { "id": 1, "joint_a": 1, "joint_b": 2 } ]
        }"#,
    );
    let truss = read_model(dir.path().join("truss.json")).expect("model loads");
    let forces = solve_forces(&truss).expect("determinate");
    assert_relative_eq!(forces[0], 12.0, epsilon = 1.0e-9);
}

#[test]
fn airfoil_directory_is_read_in_alpha_order() {
    let root = TempDir::new().expect("temporary directory");
    let dir = root.path().join("naca0000");
    fs::create_dir(&dir).expect("airfoil directory");
    write(&dir, "xy.dat", "x y\n1.0 0.0\n0.5 0.1\n0.0 0.0\n0.5 -0.1\n1.0 0.0\n");
    write(&dir, "alpha+4.0.dat", "cp\n-1.0\n-1.0\n0.0\n0.0\n");
    write(&dir, "alpha-2.0.dat", "cp\n0.0\n0.0\n-1.0\n-1.0\n");
    write(&dir, "alpha0.0.dat", "cp\n-0.5\n0.3\n0.3\n-0.5\n");

    let data = read_airfoil_dir(&dir).expect("airfoil loads");
    assert_eq!(data.name, "0000");
    assert_relative_eq!(data.airfoil.chord(), 1.0);
    let alphas: Vec<f64> = data.cases.iter().map(|case| case.alpha).collect();
    assert_eq!(alphas, vec![-2.0, 0.0, 4.0]);

    let level = &data.cases[1];
    let cl = data
        .airfoil
        .lift_coefficient(&level.pressure, level.alpha)
        .expect("matching pressure");
    assert_relative_eq!(cl, 0.0, epsilon = 1.0e-12);
}

#[test]
fn airfoil_directory_without_pressure_files_is_rejected() {
    let dir = TempDir::new().expect("temporary directory");
    write(dir.path(), "xy.dat", "x y\n1.0 0.0\n0.0 0.0\n");
    let error = read_airfoil_dir(dir.path()).expect_err("no cases");
    assert!(matches!(error, TableError::MissingData { .. }), "{error:?}");
}
