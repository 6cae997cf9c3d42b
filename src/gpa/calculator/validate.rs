use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::gpa::calculator::error::{GpaError, Result};
use crate::gpa::calculator::model::{
    CellValue, ColumnRoleMap, CourseRecord, RawTable, ValidationWarning,
};

/// How rows with non-positive credit (or negative grade points) are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Any surviving non-positive credit fails the whole sheet.
    #[default]
    Strict,
    /// Rows with non-positive credit or negative grade point are dropped.
    Lenient,
}

/// Expected grade-point scale. Values outside it only raise warnings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    pub min: f64,
    pub max: f64,
}

impl GradeBand {
    pub fn contains(&self, value: f64) -> bool {
        self.range().contains(&value)
    }

    fn range(&self) -> RangeInclusive<f64> {
        self.min..=self.max
    }
}

impl Default for GradeBand {
    fn default() -> Self {
        Self { min: 0.0, max: 5.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationOptions {
    pub policy: ValidationPolicy,
    pub grade_band: GradeBand,
}

impl ValidationOptions {
    pub fn with_policy(policy: ValidationPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }
}

/// Records that survived validation plus the bookkeeping of what was removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRows {
    pub records: Vec<CourseRecord>,
    /// Always equals the input row count minus `records.len()`.
    pub dropped_rows: usize,
    pub warnings: Vec<ValidationWarning>,
}

struct Candidate {
    row: usize,
    name: Option<String>,
    credit: Option<f64>,
    grade_point: Option<f64>,
}

/// Projects the table onto the resolved columns, drops unusable rows and
/// builds the course records in sheet order.
pub fn clean_rows(
    table: &RawTable,
    roles: &ColumnRoleMap,
    options: &ValidationOptions,
) -> Result<CleanedRows> {
    let initial_rows = table.row_count();
    let mut coercion_failures = 0usize;

    let candidates: Vec<Candidate> = (0..initial_rows)
        .filter_map(|row| {
            let credit = table.cell(row, roles.credit.index);
            let grade_point = table.cell(row, roles.grade_point.index);
            if credit.is_blank() || grade_point.is_blank() {
                return None;
            }
            let name = roles
                .course_name
                .as_ref()
                .and_then(|column| table.cell(row, column.index).to_text());
            Some(Candidate {
                row: table.sheet_row(row),
                name,
                credit: coerce(credit, &mut coercion_failures),
                grade_point: coerce(grade_point, &mut coercion_failures),
            })
        })
        .collect();

    // Rows that failed coercion carry `None` and fall out here.
    let mut records: Vec<CourseRecord> = candidates
        .into_iter()
        .filter_map(|c| {
            Some(CourseRecord {
                name: c.name,
                credit: c.credit?,
                grade_point: c.grade_point?,
                row: c.row,
            })
        })
        .collect();

    if records.is_empty() {
        return Err(GpaError::no_valid_rows());
    }

    match options.policy {
        ValidationPolicy::Strict => {
            if let Some(bad) = records.iter().find(|r| r.credit <= 0.0) {
                warn!(row = bad.row, credit = bad.credit, "non-positive credit");
                return Err(GpaError::InvalidData("credit must be positive".into()));
            }
        }
        ValidationPolicy::Lenient => {
            records.retain(|r| r.credit > 0.0 && r.grade_point >= 0.0);
            if records.is_empty() {
                return Err(GpaError::no_valid_rows());
            }
        }
    }

    let dropped_rows = initial_rows - records.len();
    let mut warnings = Vec::new();
    if dropped_rows > 0 {
        info!(dropped_rows, "ignored rows with missing or non-numeric values");
        warnings.push(ValidationWarning::RowsDropped {
            count: dropped_rows,
        });
    }
    if coercion_failures > 0 {
        warnings.push(ValidationWarning::CoercionFailures {
            count: coercion_failures,
        });
    }

    let out_of_band: Vec<ValidationWarning> = records
        .iter()
        .filter(|r| !options.grade_band.contains(r.grade_point))
        .map(|r| ValidationWarning::GradeOutOfRange {
            row: r.row,
            value: r.grade_point,
        })
        .collect();
    if !out_of_band.is_empty() {
        warn!(
            count = out_of_band.len(),
            min = options.grade_band.min,
            max = options.grade_band.max,
            "grade points outside the expected range"
        );
    }
    warnings.extend(out_of_band);

    Ok(CleanedRows {
        records,
        dropped_rows,
        warnings,
    })
}

fn coerce(cell: &CellValue, failures: &mut usize) -> Option<f64> {
    let value = cell.to_number();
    if value.is_none() {
        *failures += 1;
    }
    value
}
