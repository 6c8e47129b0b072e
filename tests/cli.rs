#![warn(clippy::pedantic)]

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use approx::assert_relative_eq;
use serde_json::Value;
use tempfile::TempDir;

const TRIANGLE_MODEL: &str = r#"{
    "joints": [
        { "id": 1, "x": 0.0, "y": 0.0, "support": { "x": true, "y": true } },
        { "id": 2, "x": 4.0, "y": 0.0, "support": { "x": false, "y": true } },
        { "id": 3, "x": 2.0, "y": 2.0, "force_y": -100.0 }
    ],
    "beams": [
        { "id": 1, "joint_a": 1, "joint_b": 2 },
        { "id": 2, "joint_a": 2, "joint_b": 3 },
        { "id": 3, "joint_a": 1, "joint_b": 3 }
    ]
}"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("temporary file is writable");
    path
}

fn trussforce(args: &[&OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_trussforce"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs")
}

fn run_model(dir: &TempDir, flags: &[&str]) -> Output {
    let model = write(dir.path(), "triangle.json", TRIANGLE_MODEL);
    let mut args = vec![OsStr::new("model"), model.as_os_str()];
    args.extend(flags.iter().map(OsStr::new));
    trussforce(&args)
}

#[test]
fn non_square_truss_exits_with_the_error() {
    let dir = TempDir::new().expect("temporary directory");
    let joints = write(
        dir.path(),
        "joints.dat",
        "Joint X Y Fx Fy Support\n1 0 0 0 0 1\n2 4 0 0 0 1\n3 2 2 0 -100 0\n",
    );
    let beams = write(dir.path(), "beams.dat", "Beam Ja Jb\n1 1 2\n2 2 3\n3 1 3\n");

    let output = trussforce(&[OsStr::new("truss"), joints.as_os_str(), beams.as_os_str()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not statically determinate"), "{stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn json_output_holds_forces_and_reactions() {
    let dir = TempDir::new().expect("temporary directory");
    let output = run_model(&dir, &["--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let document: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let beam_forces = document["beam_forces"].as_array().expect("beam force list");
    assert_eq!(beam_forces.len(), 3);
    assert_eq!(beam_forces[0]["beam"], 1);
    let force = beam_forces[0]["force"].as_f64().expect("numeric force");
    assert_relative_eq!(force, 50.0, epsilon = 1.0e-9);

    let reactions = document["reactions"].as_array().expect("reaction list");
    assert_eq!(reactions.len(), 3);
    assert_eq!(reactions[2]["joint"], 2);
    assert_eq!(reactions[2]["axis"], "y");
    assert!(document["residual"].is_number());
}

#[test]
fn reaction_table_follows_the_force_table() {
    let dir = TempDir::new().expect("temporary directory");
    let output = run_model(&dir, &["--reactions"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let forces_at = stdout.find(" Beam       Force").expect("force table");
    let reactions_at = stdout.find(" Joint  Axis    Reaction").expect("reaction table");
    assert!(forces_at < reactions_at, "{stdout}");
    assert!(stdout.contains("    1      50.000\n"), "{stdout}");
    assert!(stdout.contains("     2     y      50.000\n"), "{stdout}");
}

#[test]
fn plain_run_omits_reactions() {
    let dir = TempDir::new().expect("temporary directory");
    let output = run_model(&dir, &[]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(" Beam       Force\n"), "{stdout}");
    assert!(!stdout.contains("Reaction"), "{stdout}");
}

#[test]
fn invalid_pivot_tolerance_is_reported() {
    let dir = TempDir::new().expect("temporary directory");
    let output = run_model(&dir, &["--pivot-tolerance=-1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("pivot tolerance -1"), "{stderr}");
}
