//! End-to-end tests of the `meridian` binary against the built-in sample portfolio.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const TEMPLATE_HEADER: &str =
    "Company Name,Quarter,ARR,Gross Margin,Monthly Cash Burn,Cash Runway,Headcount,Sector,Stage,Partner";

/// Runs inside an empty directory so no stray `meridian.toml` or `.env` is picked up.
fn meridian(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("meridian").unwrap();
    cmd.current_dir(dir.path())
        .env("RUST_LOG", "warn")
        .env("MERIDIAN__UPLOAD__PROCESSING_DELAY_MS", "0");
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

fn names(values: &Value) -> Vec<String> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap().to_string())
        .collect()
}

fn write_template(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("portfolio.csv");
    fs::write(
        &path,
        format!(
            "{TEMPLATE_HEADER}\n\
             AlphaTech,Q2 2024,33136312,80.4,3253882,11,85,Healthcare,Series B,John Smith\n\
             BrightLogix,Q2 2024,9606675,45.4,3095505,9,42,FinTech,Series A,Jane Doe"
        ),
    )
    .unwrap();
    path
}

#[test]
fn list_filters_by_risk_and_keeps_full_set_summary() {
    let dir = TempDir::new().unwrap();
    let json = json_output(meridian(&dir).args(["list", "--risk", "high", "--format", "json"]));

    assert_eq!(names(&json["companies"]), vec!["EdgeSense", "HelixML"]);
    assert_eq!(json["summary"]["totalCompanies"], 12);
    assert_eq!(json["summary"]["riskCounts"]["high"], 2);
}

#[test]
fn list_sorts_by_risk_with_stable_ties() {
    let dir = TempDir::new().unwrap();
    let json = json_output(meridian(&dir).args(["list", "--sort", "risk", "--format", "json"]));

    let sorted = names(&json["companies"]);
    assert_eq!(sorted.len(), 12);
    assert_eq!(&sorted[..3], ["EdgeSense", "HelixML", "BrightLogix"]);
}

#[test]
fn unknown_sort_key_falls_back_to_name() {
    let dir = TempDir::new().unwrap();
    let json = json_output(meridian(&dir).args(["list", "--sort", "bogus", "--format", "json"]));

    assert_eq!(json["sort"], "name");
    assert_eq!(names(&json["companies"])[0], "AlphaTech");
}

#[test]
fn list_without_matches_says_so() {
    let dir = TempDir::new().unwrap();
    meridian(&dir)
        .args(["list", "--search", "no such company"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No companies found matching your filters."));
}

#[test]
fn list_rejects_unknown_risk_level() {
    let dir = TempDir::new().unwrap();
    meridian(&dir)
        .args(["list", "--risk", "severe"])
        .assert()
        .failure();
}

#[test]
fn insights_rank_top_performers_and_watchlist() {
    let dir = TempDir::new().unwrap();
    let json = json_output(meridian(&dir).args(["insights", "--format", "json"]));

    assert_eq!(names(&json["topPerformers"]), vec!["CortexAI", "HelixML", "AlphaTech"]);
    assert_eq!(names(&json["watchlist"]), vec!["EdgeSense", "HelixML"]);
    assert_eq!(json["insights"][0]["title"], "Cash Runway Alert");
}

#[test]
fn insights_table_shows_every_panel() {
    let dir = TempDir::new().unwrap();
    meridian(&dir)
        .arg("insights")
        .assert()
        .success()
        .stdout(predicate::str::contains("Top Performers"))
        .stdout(predicate::str::contains("Watchlist"))
        .stdout(predicate::str::contains("Portfolio Summary"));
}

#[test]
fn config_file_overrides_thresholds() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[insights]\ntop_performer_growth_pct = 60\n").unwrap();

    let json = json_output(meridian(&dir).args([
        "--config",
        config.to_str().unwrap(),
        "insights",
        "--format",
        "json",
    ]));
    assert_eq!(names(&json["topPerformers"]), vec!["CortexAI"]);
}

#[test]
fn analytics_honours_its_sector_filter() {
    let dir = TempDir::new().unwrap();
    let json = json_output(meridian(&dir).args(["analytics", "--sector", "FinTech", "--format", "json"]));

    assert_eq!(names(&json["runwayDistribution"]), vec!["BrightLogix", "GridPay", "Lumen"]);
    assert_eq!(json["trend"].as_array().unwrap().len(), 5);
}

#[test]
fn template_prints_to_stdout() {
    let dir = TempDir::new().unwrap();
    meridian(&dir)
        .args(["template", "--output", "-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(TEMPLATE_HEADER));
}

#[test]
fn template_is_written_with_default_name() {
    let dir = TempDir::new().unwrap();
    meridian(&dir).arg("template").assert().success();

    let written = fs::read_to_string(dir.path().join("portfolio_data_template.csv")).unwrap();
    assert!(written.starts_with(TEMPLATE_HEADER));
    assert_eq!(written.lines().count(), 3);
}

#[test]
fn list_reads_records_from_a_data_file() {
    let dir = TempDir::new().unwrap();
    let data = write_template(&dir);

    let json = json_output(meridian(&dir).args(["list", "--data", data.to_str().unwrap(), "--format", "json"]));
    assert_eq!(names(&json["companies"]), vec!["AlphaTech", "BrightLogix"]);
    assert_eq!(json["companies"][0]["id"], "1");
}

#[test]
fn upload_replaces_the_portfolio() {
    let dir = TempDir::new().unwrap();
    let data = write_template(&dir);

    meridian(&dir)
        .args(["upload", data.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Data uploaded successfully"))
        .stdout(predicate::str::contains("Replaced 12 companies with 2"));
}

#[test]
fn upload_json_output_is_a_single_document() {
    let dir = TempDir::new().unwrap();
    let data = write_template(&dir);

    let output = meridian(&dir)
        .args(["upload", data.to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "command failed: {output:?}");

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["recordCount"], 2);
    assert_eq!(json["previousCount"], 12);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Data uploaded successfully"));
}

#[test]
fn upload_accepts_the_minimal_column_set() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("minimal.csv");
    fs::write(
        &path,
        "Company Name,Quarter,ARR,Gross Margin,Monthly Cash Burn,Cash Runway,Headcount\n\
         Acme,Q2 2024,1200000,70,90000,12,10\n",
    )
    .unwrap();

    let json = json_output(meridian(&dir).args(["upload", path.to_str().unwrap(), "--format", "json"]));
    assert_eq!(json["recordCount"], 1);
}

#[test]
fn upload_refuses_non_csv_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("portfolio.txt");
    fs::write(&path, "not a spreadsheet").unwrap();

    meridian(&dir)
        .args(["upload", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid file type"))
        .stderr(predicate::str::contains("Please select a CSV file."));
}
