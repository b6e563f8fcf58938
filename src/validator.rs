use std::collections::BTreeMap;

use tracing::debug;

use crate::dates::{parse_date, Period};
use crate::grid::DATE_HEADER;
use crate::settings::{LabelSet, RuleSet};
use crate::table::Table;

pub const CATEGORY_COLUMN: &str = "Category";
pub const PAYMENT_METHOD_COLUMN: &str = "w/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Check {
    RequiredValues,
    Category,
    PaymentMethod,
    SinglePeriod,
}

impl Check {
    pub const ALL: [Check; 4] = [
        Check::RequiredValues,
        Check::Category,
        Check::PaymentMethod,
        Check::SinglePeriod,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::RequiredValues => "Missing values found in critical columns:",
            Self::Category => "Invalid category values found:",
            Self::PaymentMethod => "Invalid payment method values found:",
            Self::SinglePeriod => "Dates not in the common month/year:",
        }
    }
}

/// One offending data row. `row` is the 0-based index into the table's data
/// rows; `fields` are the (column, value) pairs worth showing for it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Violation {
    pub check: Check,
    pub row: usize,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
    pub common_period: Option<Period>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn for_check(&self, check: Check) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.check == check)
    }
}

/// Run every check against `table`. No check stops the others.
pub fn validate(table: &Table, rules: &RuleSet) -> ValidationReport {
    let mut violations = check_required_values(table, &rules.required_columns);
    violations.extend(check_membership(
        table,
        Check::Category,
        CATEGORY_COLUMN,
        &rules.categories,
    ));
    violations.extend(check_membership(
        table,
        Check::PaymentMethod,
        PAYMENT_METHOD_COLUMN,
        &rules.payment_methods,
    ));
    let (common_period, anomalies) = check_single_period(table);
    violations.extend(anomalies);

    debug!(violations = violations.len(), "validation finished");
    ValidationReport {
        violations,
        common_period,
    }
}

fn cell<'a>(table: &'a Table, row: usize, col: Option<usize>) -> &'a str {
    col.and_then(|c| table.rows[row].get(c))
        .map(String::as_str)
        .unwrap_or("")
}

/// Every required column must be filled on every row. A column that does not
/// exist counts as empty everywhere.
pub fn check_required_values(table: &Table, required: &LabelSet) -> Vec<Violation> {
    if required.is_empty() {
        return Vec::new();
    }
    let columns: Vec<(&str, Option<usize>)> = required
        .iter()
        .map(|name| (name, table.column_index(name)))
        .collect();

    (0..table.rows.len())
        .filter_map(|row| {
            let fields: Vec<(String, String)> = columns
                .iter()
                .map(|(name, col)| (name.to_string(), cell(table, row, *col).to_string()))
                .collect();
            fields
                .iter()
                .any(|(_, value)| value.is_empty())
                .then_some(Violation {
                    check: Check::RequiredValues,
                    row,
                    fields,
                })
        })
        .collect()
}

/// Every value in `column` must belong to `allowed`. Without the column no
/// row can pass.
pub fn check_membership(
    table: &Table,
    check: Check,
    column: &str,
    allowed: &LabelSet,
) -> Vec<Violation> {
    let col = table.column_index(column);
    (0..table.rows.len())
        .filter_map(|row| {
            let value = cell(table, row, col);
            (col.is_none() || !allowed.contains(value)).then(|| Violation {
                check,
                row,
                fields: vec![(column.to_string(), value.to_string())],
            })
        })
        .collect()
}

/// Flag parseable dates outside the most common (year, month). Ties go to the
/// earliest period. Unparseable dates are ignored.
pub fn check_single_period(table: &Table) -> (Option<Period>, Vec<Violation>) {
    let Some(col) = table.column_index(DATE_HEADER) else {
        return (None, Vec::new());
    };

    let dated: Vec<(usize, Period)> = (0..table.rows.len())
        .filter_map(|row| parse_date(cell(table, row, Some(col))).map(|d| (row, Period::of(d))))
        .collect();

    let mut counts: BTreeMap<Period, usize> = BTreeMap::new();
    for (_, period) in &dated {
        *counts.entry(*period).or_default() += 1;
    }
    let mut common: Option<(Period, usize)> = None;
    for (period, count) in counts {
        if common.map_or(true, |(_, best)| count > best) {
            common = Some((period, count));
        }
    }
    let Some((common, _)) = common else {
        return (None, Vec::new());
    };

    let anomalies = dated
        .into_iter()
        .filter(|(_, period)| *period != common)
        .map(|(row, period)| Violation {
            check: Check::SinglePeriod,
            row,
            fields: vec![
                (DATE_HEADER.to_string(), cell(table, row, Some(col)).to_string()),
                ("Period".to_string(), period.to_string()),
            ],
        })
        .collect();
    (Some(common), anomalies)
}
