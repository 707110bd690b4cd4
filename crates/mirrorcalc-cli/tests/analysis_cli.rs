use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn mirrorcalc_binary() -> &'static str {
    env!("CARGO_BIN_EXE_mirrorcalc")
}

fn run_mirrorcalc(working_dir: &Path, args: &[&str]) -> Output {
    Command::new(mirrorcalc_binary())
        .current_dir(working_dir)
        .args(args)
        .output()
        .expect("mirrorcalc should spawn")
}

fn stage_flux_fixture(dir: &Path) -> PathBuf {
    let mut content =
        String::from("Energy Total c2 c3 c4 Filtered c6\n[eV] [ph/s] - - - [ph/s] -\n");
    for index in 0..41 {
        let energy = 1_000.0 + 500.0 * index as f64;
        content.push_str(&format!("{energy:.1} 1.0e13 0 0 0 4.0e12 9\n"));
    }
    let path = dir.join("Flux_QUATI_M1_E1.txt");
    fs::write(&path, content).expect("flux fixture should be staged");
    path
}

fn stage_config(dir: &Path, flux_path: &Path) -> PathBuf {
    let config = json!({
        "grid": { "start_ev": 100.0, "end_ev": 80_000.0, "samples": 64 },
        "flux_table": {
            "path": flux_path,
            "header_lines": 2,
            "energy_column": 0,
            "total_column": 1,
            "filtered_column": 5
        },
        "plot": { "width_px": 640, "height_px": 480 }
    });
    let path = dir.join("analysis.json");
    fs::write(&path, serde_json::to_string_pretty(&config).expect("config should encode"))
        .expect("config fixture should be staged");
    path
}

#[test]
fn run_command_produces_artifacts_and_the_result_block() {
    let temp = TempDir::new().expect("tempdir should be created");
    let flux_path = stage_flux_fixture(temp.path());
    let config_path = stage_config(temp.path(), &flux_path);
    let output_dir = temp.path().join("out");

    let output = run_mirrorcalc(
        temp.path(),
        &[
            "run",
            "--config",
            config_path.to_str().expect("config path should be utf-8"),
            "--output-dir",
            output_dir.to_str().expect("output dir should be utf-8"),
        ],
    );

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total Power = "), "stdout: {stdout}");
    assert!(stdout.contains("Filtered Power = "), "stdout: {stdout}");
    assert!(stdout.contains("ph/sec/100mA"), "stdout: {stdout}");

    for name in [
        "Refl_Pt_E100_80000.txt",
        "Pt_Reflectivity.png",
        "Flux.png",
        "power_summary.json",
    ] {
        assert!(
            output_dir.join(name).is_file(),
            "artifact '{name}' should exist"
        );
    }
}

#[test]
fn reflectivity_command_skips_the_flux_stages() {
    let temp = TempDir::new().expect("tempdir should be created");
    // no flux fixture staged: the reflectivity stage must not need one
    let config_path = stage_config(temp.path(), &temp.path().join("absent.txt"));
    let output_dir = temp.path().join("out");

    let output = run_mirrorcalc(
        temp.path(),
        &[
            "reflectivity",
            "--config",
            config_path.to_str().expect("config path should be utf-8"),
            "--output-dir",
            output_dir.to_str().expect("output dir should be utf-8"),
        ],
    );

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output_dir.join("Refl_Pt_E100_80000.txt").is_file());
    assert!(output_dir.join("Pt_Reflectivity.png").is_file());
    assert!(!output_dir.join("Flux.png").exists());
}

#[test]
fn flux_command_reports_the_four_scalar_results() {
    let temp = TempDir::new().expect("tempdir should be created");
    let flux_path = stage_flux_fixture(temp.path());
    let config_path = stage_config(temp.path(), &flux_path);
    let output_dir = temp.path().join("out");

    let output = run_mirrorcalc(
        temp.path(),
        &[
            "flux",
            "--config",
            config_path.to_str().expect("config path should be utf-8"),
            "--output-dir",
            output_dir.to_str().expect("output dir should be utf-8"),
        ],
    );

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    for marker in [
        "Total Power = ",
        "Filtered Power = ",
        "Total Flux = ",
        "Filtered Flux = ",
    ] {
        assert!(stdout.contains(marker), "stdout should contain '{marker}'");
    }
    assert!(output_dir.join("power_summary.json").is_file());
}

#[test]
fn missing_flux_table_exits_with_the_io_code() {
    let temp = TempDir::new().expect("tempdir should be created");
    let config_path = stage_config(temp.path(), &temp.path().join("absent.txt"));

    let output = run_mirrorcalc(
        temp.path(),
        &[
            "flux",
            "--config",
            config_path.to_str().expect("config path should be utf-8"),
        ],
    );

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("IO.FLUX_TABLE_READ"),
        "stderr should name the diagnostic code, got: {stderr}"
    );
    assert!(stderr.contains("absent.txt"));
}

#[test]
fn invalid_configuration_exits_with_the_validation_code() {
    let temp = TempDir::new().expect("tempdir should be created");
    let config_path = temp.path().join("analysis.json");
    fs::write(
        &config_path,
        r#"{ "grid": { "start_ev": 5000.0, "end_ev": 100.0, "samples": 64 } }"#,
    )
    .expect("config fixture should be staged");

    let output = run_mirrorcalc(
        temp.path(),
        &[
            "run",
            "--config",
            config_path.to_str().expect("config path should be utf-8"),
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("INPUT.GRID_BOUNDS"), "stderr: {stderr}");
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output = run_mirrorcalc(temp.path(), &["frobnicate"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("INPUT.CLI_USAGE"), "stderr: {stderr}");
}
