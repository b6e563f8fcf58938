use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const EXPORT: &str = "\
Expense Report,,,,,
Employee:,Alice Smith,,,,
,,,,,
,Date,Description,Amount,Category,w/
,03/15/2024,Hotel ,99.00,Lodging,AMEX
,,,,,
, 03/02/2024,Lunch,12.00,Meals,Cash
,,Total,111.00,,
";

fn write_config(dir: &Path) {
    fs::write(dir.join("replacement_map.json"), r#"{"AMEX": "Amex", "Lodging": "Travel"}"#).unwrap();
    fs::write(dir.join("categories.json"), r#"["Meals", "Travel"]"#).unwrap();
    fs::write(dir.join("payment_methods.json"), r#"{"Amex": "corporate", "Cash": "reimburse"}"#).unwrap();
    fs::write(dir.join("required_values.json"), r#"["Date", "Amount", "Category"]"#).unwrap();
}

fn tidy(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("expense-tidy").unwrap();
    cmd.arg("--config-dir").arg(config).env_remove("RUST_LOG");
    cmd
}

#[test]
fn format_sort_validate_pipeline() {
    let cfg = tempfile::tempdir().unwrap();
    write_config(cfg.path());
    let reports = tempfile::tempdir().unwrap();
    let report = reports.path().join("march.csv");
    fs::write(&report, EXPORT).unwrap();

    tidy(cfg.path())
        .arg("format")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("reformatted successfully."));
    assert_eq!(
        fs::read_to_string(&report).unwrap(),
        "Date,Description,Amount,Category,w/\n\
         03/15/2024,Hotel,99.00,Travel,Amex\n\
         03/02/2024,Lunch,12.00,Meals,Cash\n"
    );

    tidy(cfg.path())
        .arg("sort")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("sorted by date successfully."));
    assert_eq!(
        fs::read_to_string(&report).unwrap(),
        "Date,Description,Amount,Category,w/\n\
         03/02/2024,Lunch,12.00,Meals,Cash\n\
         03/15/2024,Hotel,99.00,Travel,Amex\n"
    );

    tidy(cfg.path())
        .arg("validate")
        .arg(reports.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All report files were validated successfully."));
}

#[test]
fn validate_reports_every_problem() {
    let cfg = tempfile::tempdir().unwrap();
    write_config(cfg.path());
    let reports = tempfile::tempdir().unwrap();
    fs::write(
        reports.path().join("bad.csv"),
        "Date,Amount,Category,w/\n\
         03/01/2024,12.00,,Cash\n\
         03/02/2024,30.00,Snacks,Venmo\n\
         04/03/2024,5.00,Meals,Amex\n\
         03/04/2024,8.00,Meals,Amex\n",
    )
    .unwrap();

    tidy(cfg.path())
        .arg("validate")
        .arg(reports.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Missing values found in critical columns:"))
        .stdout(predicate::str::contains("Invalid category values found:"))
        .stdout(predicate::str::contains("Snacks"))
        .stdout(predicate::str::contains("Invalid payment method values found:"))
        .stdout(predicate::str::contains("Venmo"))
        .stdout(predicate::str::contains("Dates not in the common month/year:"))
        .stdout(predicate::str::contains("04/03/2024"))
        .stdout(predicate::str::contains("One or more report files have issues."));
}

#[test]
fn batch_continues_after_bad_file() {
    let cfg = tempfile::tempdir().unwrap();
    write_config(cfg.path());
    let reports = tempfile::tempdir().unwrap();
    fs::write(reports.path().join("a_broken.csv"), "nothing,to,see\n").unwrap();
    fs::create_dir(reports.path().join("april")).unwrap();
    fs::write(reports.path().join("april").join("b.csv"), EXPORT).unwrap();

    tidy(cfg.path())
        .arg("format")
        .arg(reports.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("'Date' header not found in CSV."))
        .stdout(predicate::str::contains("b.csv reformatted successfully."));
    let b = fs::read_to_string(reports.path().join("april").join("b.csv")).unwrap();
    assert!(b.starts_with("Date,Description"));
}

#[test]
fn sort_without_date_column_fails_that_file() {
    let cfg = tempfile::tempdir().unwrap();
    let reports = tempfile::tempdir().unwrap();
    let path = reports.path().join("r.csv");
    fs::write(&path, "When,Amount\nyesterday,1\n").unwrap();

    tidy(cfg.path())
        .arg("sort")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("'Date' column not found"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "When,Amount\nyesterday,1\n");
}

#[test]
fn missing_path_is_fatal() {
    let cfg = tempfile::tempdir().unwrap();
    tidy(cfg.path())
        .arg("format")
        .arg(cfg.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist."));
}

#[test]
fn missing_argument_is_usage_error() {
    let cfg = tempfile::tempdir().unwrap();
    tidy(cfg.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn malformed_rule_file_stops_before_processing() {
    let cfg = tempfile::tempdir().unwrap();
    write_config(cfg.path());
    fs::write(cfg.path().join("payment_methods.json"), "true").unwrap();
    let reports = tempfile::tempdir().unwrap();
    fs::write(reports.path().join("r.csv"), "Date\n03/01/2024\n").unwrap();

    tidy(cfg.path())
        .arg("validate")
        .arg(reports.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs to be an array or object."))
        .stdout(predicate::str::contains("Validating").not());
}
