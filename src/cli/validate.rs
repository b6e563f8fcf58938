use std::path::Path;

use colored::Colorize;

use crate::cli::run_batch;
use crate::error::{Result, TidyError};
use crate::files::collect_csv_files;
use crate::fmt::{divider, violation_table};
use crate::settings::{config_dir, RuleSet};
use crate::table::Table;
use crate::validator::{validate, Check, ValidationReport};

pub fn run(path: &Path, config: Option<&Path>) -> Result<bool> {
    let rules = RuleSet::load(&config_dir(config))?;
    let files = collect_csv_files(path)?;

    let mut invalid = 0usize;
    let failed = run_batch(&files, |file| {
        println!("{}", divider());
        println!("Validating {}...", file.display());
        let report = validate_file(file, &rules)?;
        print_report(&report);
        if !report.is_valid() {
            invalid += 1;
        }
        Ok(())
    });

    let all_valid = failed == 0 && invalid == 0;
    println!("{}", divider());
    if all_valid {
        println!("{}", "All report files were validated successfully.".green());
    } else {
        println!("{}", "One or more report files have issues.".red());
    }
    Ok(all_valid)
}

pub fn validate_file(file: &Path, rules: &RuleSet) -> Result<ValidationReport> {
    if !file.is_file() {
        return Err(TidyError::PathNotFound(file.to_path_buf()));
    }
    let table = Table::from_path(file)?;
    Ok(validate(&table, rules))
}

fn print_report(report: &ValidationReport) {
    for check in Check::ALL {
        let violations: Vec<_> = report.for_check(check).collect();
        if violations.is_empty() {
            continue;
        }
        println!("{}", check.title().yellow());
        if check == Check::SinglePeriod {
            if let Some(period) = report.common_period {
                println!("Most common month/year: {period}");
            }
        }
        println!("{}", violation_table(&violations));
    }
}
