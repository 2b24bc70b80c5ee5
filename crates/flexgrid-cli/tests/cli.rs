//! CLI command integration tests.
//! Each test points HOME at a temp directory so no user config leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn flexgrid_cmd(home: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("flexgrid").unwrap();
    cmd.env("HOME", home.path()).env_remove("FLEXGRID_CONFIG");
    cmd
}

#[test]
fn index_of_central_frequency() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home)
        .args(["index", "193.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("index:  284"))
        .stdout(predicate::str::contains("lower:  285"))
        .stdout(predicate::str::contains("higher: 284"))
        .stdout(predicate::str::contains("n:      0"));
}

#[test]
fn index_out_of_range_fails() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home)
        .args(["index", "200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("frequency not in range"));
}

#[test]
fn slot_frequencies() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home)
        .args(["slot", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("start:  189.55"))
        .stdout(predicate::str::contains("stop:   189.5625"))
        .stdout(predicate::str::contains("name:   N-284"));
}

#[test]
fn slot_outside_raster_rejected_by_parser() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home).args(["slot", "769"]).assert().failure();
}

#[test]
fn center_with_precision() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home)
        .args(["center", "193.1", "193.1125", "--precision", "4"])
        .assert()
        .success()
        .stdout("193.1062\n");
}

#[test]
fn center_overflow_fails_cleanly() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home)
        .args(["center", "79228162514264337593543950335", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("frequency not in range"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn center_precision_is_bounded() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home)
        .args(["center", "193.1", "193.15", "--precision", "28"])
        .assert()
        .success();
    flexgrid_cmd(&home)
        .args(["center", "193.1", "193.15", "--precision", "30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("30"));
}

#[test]
fn center_open_config() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home)
        .args(["center", "193.1", "193.15", "--precision", "0", "--open-config"])
        .assert()
        .success()
        .stdout("193125000\n");
}

#[test]
fn width_known_and_fallback() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home)
        .args(["width", "200", "dp-qpsk"])
        .assert()
        .success()
        .stdout("80\n");

    flexgrid_cmd(&home)
        .args(["width", "1", "bpsk"])
        .assert()
        .success()
        .stdout("40\n")
        .stderr(predicate::str::contains("no width found"));
}

#[test]
fn width_from_config_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("grid.toml");
    std::fs::write(
        &config,
        "default_width = 50\n\n[[widths]]\nrate = 800\nmodulation = \"dp-qam16\"\nwidth = 150\n",
    )
    .unwrap();

    flexgrid_cmd(&home)
        .arg("--config")
        .arg(&config)
        .args(["width", "800", "dp-qam16"])
        .assert()
        .success()
        .stdout("150\n");

    flexgrid_cmd(&home)
        .env("FLEXGRID_CONFIG", &config)
        .args(["width", "100", "dp-qpsk"])
        .assert()
        .success()
        .stdout("50\n");
}

#[test]
fn home_config_is_picked_up() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join(".flexgrid")).unwrap();
    std::fs::write(
        home.path().join(".flexgrid/config.toml"),
        "fixed_grid_precision = 2\n",
    )
    .unwrap();

    flexgrid_cmd(&home)
        .args(["fixed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"center-frequency\": \"196.10\""));
}

#[test]
fn invalid_config_fails() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("bad.toml");
    std::fs::write(&config, "default_width = -1\n").unwrap();

    flexgrid_cmd(&home)
        .arg("--config")
        .arg(&config)
        .args(["width", "100", "dp-qpsk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load grid config"));
}

#[test]
fn lcm_and_slots() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home)
        .args(["lcm", "12.5", "25", "50", "--slots-for", "12.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lcm:    50"))
        .stdout(predicate::str::contains("slots:  4"));
}

#[test]
fn lcm_rejects_non_positive() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home)
        .args(["lcm", "12.5", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid granularity"));
}

#[test]
fn spectrum_as_json() {
    let home = TempDir::new().unwrap();
    let output = flexgrid_cmd(&home)
        .args(["spectrum", "--lower", "285", "--higher", "288"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["min-frequency"], "193.1");
    assert_eq!(json["max-frequency"], "193.15");
    assert_eq!(json["center-frequency"], "193.125");
    assert_eq!(json["width"], "40");
    assert_eq!(json["modulation-format"], "dp-qpsk");
}

#[test]
fn spectrum_outside_raster_fails() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home)
        .args(["spectrum", "--lower", "0", "--higher", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("spectral slot out of range"));
}

#[test]
fn fixed_grid_channel() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home)
        .args(["fixed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"center-frequency\": \"196.1000\""))
        .stdout(predicate::str::contains("\"wavelength\": \"1528.77\""));

    flexgrid_cmd(&home).args(["fixed", "97"]).assert().failure();
}

#[test]
fn dbm_conversion() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home)
        .args(["dbm", "30"])
        .assert()
        .success()
        .stdout("1\n");

    let output = flexgrid_cmd(&home).args(["dbm", "-10"]).output().unwrap();
    assert!(output.status.success());
    let watts: f64 = String::from_utf8_lossy(&output.stdout).trim().parse().unwrap();
    assert!((watts - 1e-4).abs() < 1e-12, "got {watts}");
}

#[test]
fn config_prints_defaults() {
    let home = TempDir::new().unwrap();
    flexgrid_cmd(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("# source: built-in defaults"))
        .stdout(predicate::str::contains("[[widths]]"))
        .stdout(predicate::str::contains("dp-qam16"));
}
