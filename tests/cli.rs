use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn benchmark() -> Command {
    Command::cargo_bin("kinetic_benchmark").expect("kinetic_benchmark bin")
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("run benchmark");
    assert!(output.status.success(), "benchmark exited with {}", output.status);
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

/// S values printed by the text report, in order.
fn text_ratios(text: &str) -> Vec<f64> {
    text.lines()
        .filter_map(|line| line.strip_prefix("S (Δv / ΔE)      : "))
        .map(|value| value.parse::<f64>().expect("numeric S"))
        .collect()
}

#[test]
fn default_run_prints_text_report() {
    benchmark()
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Kinetic Conversion Efficiency Benchmark ===",
        ))
        .stdout(predicate::str::contains("System           : Agile Robot"))
        .stdout(predicate::str::contains("System           : Electric Vehicle"))
        .stdout(predicate::str::contains("System           : AI Agent (Abstract)"));
}

#[test]
fn json_matches_text_report() {
    let text = stdout_of(&mut benchmark());
    let json = stdout_of(benchmark().arg("--json"));

    let rows: serde_json::Value = serde_json::from_str(&json).expect("json output");
    let rows = rows.as_array().expect("json array");
    assert_eq!(rows.len(), 3);

    let printed = text_ratios(&text);
    assert_eq!(printed.len(), 3);
    for (row, s_text) in rows.iter().zip(printed) {
        let s_json = row["S"].as_f64().expect("numeric S");
        assert!((s_json - s_text).abs() < 1e-6, "{s_json} vs {s_text}");
        assert!(row["delta_v"].is_number());
        assert!(row["delta_e"].is_number());
        assert!(row["name"].is_string());
    }
    assert_eq!(rows[0]["S"].as_f64(), Some(4.0 / 50.0));
    assert_eq!(rows[1]["S"].as_f64(), Some(25.0 / 500.0));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let first = stdout_of(benchmark().arg("--json"));
    let second = stdout_of(benchmark().arg("--json"));
    assert_eq!(first, second);
}

#[test]
fn rank_sorts_json_by_ratio() {
    let json = stdout_of(benchmark().args(["--json", "--rank"]));
    let rows: serde_json::Value = serde_json::from_str(&json).expect("json output");
    let names: Vec<_> = rows
        .as_array()
        .expect("json array")
        .iter()
        .map(|row| row["name"].as_str().expect("name").to_string())
        .collect();
    assert_eq!(
        names,
        ["Agile Robot", "AI Agent (Abstract)", "Electric Vehicle"]
    );
}

#[test]
fn invalid_profile_is_skipped_and_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("profiles.yaml");
    fs::write(
        &path,
        "- name: Agile Robot\n  mass_kg: 0.5\n  v_final_m_s: 4.0\n  energy_consumed_j: 50.0\n\
         - name: Stalled Cart\n  mass_kg: 3.0\n  v_final_m_s: 1.0\n  energy_consumed_j: 0.0\n\
         - name: Electric Vehicle\n  mass_kg: 1.0\n  v_final_m_s: 25.0\n  energy_consumed_j: 500.0\n",
    )
    .expect("write profiles");

    let json = stdout_of(benchmark().arg("--json").arg("--profiles").arg(&path));
    let rows: serde_json::Value = serde_json::from_str(&json).expect("json output");
    let rows = rows.as_array().expect("json array");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["S"].as_f64(), Some(0.08));
    assert!(rows[1]["S"].is_null());
    assert!(rows[1]["error"].is_string());
    assert_eq!(rows[2]["S"].as_f64(), Some(0.05));

    benchmark()
        .arg("--profiles")
        .arg(&path)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 profile(s) failed validation"));
}

#[test]
fn twin_mode_reports_simulated_profiles() {
    let json = stdout_of(benchmark().args(["--twin", "--json"]));
    let rows: serde_json::Value = serde_json::from_str(&json).expect("json output");
    let rows = rows.as_array().expect("json array");
    assert_eq!(rows.len(), 3);
    let robot_v = rows[0]["delta_v"].as_f64().expect("delta_v");
    assert!((robot_v - 168.0_f64.sqrt()).abs() < 1e-9);
    assert_eq!(rows[0]["delta_e"].as_f64(), Some(60.0));
}

#[test]
fn rejected_twin_gets_an_error_row() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("twins.yaml");
    fs::write(
        &path,
        "- name: Agile Robot\n  mass_kg: 0.5\n  efficiency: 0.7\n  energy_budget_j: 60.0\n\
         - name: Weightless\n  mass_kg: 0.0\n  efficiency: 0.5\n  energy_budget_j: 10.0\n\
         - name: Endless\n  mass_kg: 1.0\n  efficiency: 0.5\n  energy_budget_j: 1.0e17\n",
    )
    .expect("write twins");

    let json = stdout_of(benchmark().args(["--twin", "--json", "--twins"]).arg(&path));
    let rows: serde_json::Value = serde_json::from_str(&json).expect("json output");
    let rows = rows.as_array().expect("json array");
    assert_eq!(rows.len(), 3);
    assert!(rows[0]["S"].is_number());
    assert_eq!(rows[1]["name"], "Weightless");
    assert!(rows[1]["S"].is_null());
    assert!(
        rows[1]["error"]
            .as_str()
            .is_some_and(|e| e.contains("mass must be positive"))
    );
    assert!(rows[2]["S"].is_null());
    assert!(rows[2]["error"].as_str().is_some_and(|e| e.contains("limit is")));

    benchmark()
        .args(["--twin", "--strict", "--twins"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 profile(s) failed validation"));
}

#[test]
fn twin_trace_is_written_alongside_the_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let trace = dir.path().join("trace/twins.json");

    benchmark()
        .arg("--twin")
        .arg("--trace")
        .arg(&trace)
        .assert()
        .success()
        .stdout(predicate::str::contains("System           : Agile Robot"));

    let contents = fs::read_to_string(&trace).expect("trace file");
    let twins: serde_json::Value = serde_json::from_str(&contents).expect("trace json");
    let twins = twins.as_array().expect("trace array");
    assert_eq!(twins.len(), 3);
    assert_eq!(twins[0]["samples"].as_array().map(Vec::len), Some(13));
    assert_eq!(twins[1]["samples"].as_array().map(Vec::len), Some(21));
    assert!(twins[2]["kinetic_energy_j"].is_number());
}

#[test]
fn trace_requires_twin_mode() {
    benchmark()
        .args(["--trace", "unused.json"])
        .assert()
        .failure();
}

#[test]
fn report_can_be_written_to_a_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("reports/run.json");

    benchmark()
        .arg("--json")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let contents = fs::read_to_string(&out).expect("report file");
    let rows: serde_json::Value = serde_json::from_str(&contents).expect("json file");
    assert_eq!(rows.as_array().map(Vec::len), Some(3));
}

#[test]
fn missing_catalog_fails_cleanly() {
    benchmark()
        .args(["--profiles", "does/not/exist.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading profiles from"));
}
