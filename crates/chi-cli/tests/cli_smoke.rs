use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::Value;

fn chi_like(ratio: f64) -> f64 {
    -(1.0 + 0.1 * ratio.ln()) / (ratio * ratio)
}

fn write_table(path: &Path, angle: &str, log_min: f64, log_max: f64, knots: usize) {
    let mut body = format!(
        "# nu/nu_c chi\n# angle = {angle}\n# kappa = 3.5\n# theta_e = 10\n# component = 22\n# dist = PL\n# part = real\n"
    );
    for ratio in chi_core::logspace(log_min, log_max, knots) {
        body.push_str(&format!("{ratio:e} {:e}\n", chi_like(ratio)));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("table dir");
    }
    fs::write(path, body).expect("write table");
}

fn chi_cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_chi-cli"))
}

#[test]
fn run_writes_rank_directories_and_report() {
    let temp = tempfile::tempdir().expect("tmp dir");
    let tables = temp.path().join("tables");
    fs::create_dir_all(&tables).expect("tables dir");
    for angle in ["30", "60"] {
        write_table(&tables.join(format!("coarse_{angle}.txt")), angle, 0.5, 3.5, 31);
        write_table(&tables.join(format!("dense_{angle}.txt")), angle, 0.5, 3.5, 601);
    }
    let config = temp.path().join("run.yaml");
    fs::write(
        &config,
        "angles: [30, 60]\n\
         workers: 2\n\
         approx: {kind: table, path: \"tables/coarse_{angle}.txt\"}\n\
         reference: {kind: table, path: \"tables/dense_{angle}.txt\"}\n\
         output: {plot: true}\n",
    )
    .expect("write config");
    let out = temp.path().join("out");

    let output = chi_cli()
        .arg("run")
        .arg("--config")
        .arg(&config)
        .arg("--out")
        .arg(&out)
        .output()
        .expect("run chi-cli");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let first = out.join("rank_00").join("chi_22_real_30deg_PL_error.txt");
    let second = out.join("rank_01").join("chi_22_real_60deg_PL_error.txt");
    for path in [&first, &second] {
        let body = fs::read_to_string(path).expect("error file");
        assert_eq!(body.lines().count(), 10);
        assert!(path.with_extension("svg").exists());
    }
    assert!(out.join("config.yaml").exists());

    let report: Value =
        serde_json::from_slice(&fs::read(out.join("sweep_report.json")).expect("report"))
            .expect("json");
    assert_eq!(report["workers"], 2);
    assert_eq!(report["angles"].as_array().map(Vec::len), Some(2));
}

#[test]
fn missing_table_fails_the_run() {
    let temp = tempfile::tempdir().expect("tmp dir");
    let config = temp.path().join("run.yaml");
    fs::write(
        &config,
        "approx: {kind: table, path: \"absent_{angle}.txt\"}\n\
         reference: {kind: constant, value: 1.0}\n",
    )
    .expect("write config");
    let status = chi_cli()
        .arg("run")
        .arg("--config")
        .arg(&config)
        .arg("--out")
        .arg(temp.path().join("out"))
        .status()
        .expect("run chi-cli");
    assert!(!status.success());
}

#[test]
fn grid_prints_every_ratio() {
    let output = chi_cli()
        .args(["grid", "--samples", "10"])
        .output()
        .expect("run chi-cli");
    assert!(output.status.success());
    let body = String::from_utf8(output.stdout).expect("utf8");
    let rows: Vec<&str> = body.lines().filter(|line| !line.starts_with('#')).collect();
    assert_eq!(rows.len(), 10);
    assert!(rows[0].starts_with("1e1 "));
    assert!(rows[9].starts_with("1e3 "));
}

#[test]
fn plot_renders_a_saved_error_file() {
    let temp = tempfile::tempdir().expect("tmp dir");
    let input = temp.path().join("chi_22_real_60deg_PL_error.txt");
    let body: String = (1..=10).map(|i| format!("{:e}\n", 1e-4 * f64::from(i))).collect();
    fs::write(&input, body).expect("write errors");
    let svg = temp.path().join("error.svg");

    let status = chi_cli()
        .args(["plot", "--grid-min", "1", "--grid-max", "3", "--samples", "10"])
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&svg)
        .status()
        .expect("run chi-cli");
    assert!(status.success());
    assert!(fs::read_to_string(&svg).expect("svg").contains("<svg"));
}

#[test]
fn tables_recorded_for_other_parameters_fail_the_run() {
    let temp = tempfile::tempdir().expect("tmp dir");
    write_table(&temp.path().join("coarse_60.txt"), "60", 0.5, 3.5, 31);
    write_table(&temp.path().join("dense_60.txt"), "60", 0.5, 3.5, 601);
    let config = temp.path().join("run.yaml");
    fs::write(
        &config,
        "params: {kappa: 100}\n\
         approx: {kind: table, path: \"coarse_{angle}.txt\"}\n\
         reference: {kind: table, path: \"dense_{angle}.txt\"}\n",
    )
    .expect("write config");
    let output = chi_cli()
        .arg("run")
        .arg("--config")
        .arg(&config)
        .arg("--out")
        .arg(temp.path().join("out"))
        .output()
        .expect("run chi-cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("param-mismatch"));
}

#[test]
fn bundled_config_runs_once_tables_exist() {
    let temp = tempfile::tempdir().expect("tmp dir");
    let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../configs/chi_22_real_pl.yaml");
    let config = temp.path().join("chi_22_real_pl.yaml");
    fs::copy(&bundled, &config).expect("copy config");
    for angle in ["5", "15", "25", "35", "45", "55", "60", "65", "75", "85"] {
        let name = format!("chi_22_real_{angle}deg_PL.txt");
        write_table(&temp.path().join("tables/spline").join(&name), angle, 0.5, 3.5, 31);
        write_table(&temp.path().join("tables/integrated").join(&name), angle, 0.5, 3.5, 301);
    }
    let out = temp.path().join("out");
    let output = chi_cli()
        .arg("run")
        .arg("--config")
        .arg(&config)
        .arg("--out")
        .arg(&out)
        .output()
        .expect("run chi-cli");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: Value =
        serde_json::from_slice(&fs::read(out.join("sweep_report.json")).expect("report"))
            .expect("json");
    assert_eq!(report["workers"], 4);
    assert_eq!(report["angles"].as_array().map(Vec::len), Some(10));
}
