use std::path::Path;

use tracing::{debug, info, instrument};

use crate::gpa::calculator::aggregate::aggregate;
use crate::gpa::calculator::error::Result;
use crate::gpa::calculator::io::{excel_read, summary_write};
use crate::gpa::calculator::model::{GpaReport, RawTable};
use crate::gpa::calculator::report::Locale;
use crate::gpa::calculator::resolve::resolve_columns;
use crate::gpa::calculator::validate::{ValidationOptions, clean_rows};

/// Loads a workbook and runs it through resolution, validation and
/// aggregation.
#[instrument(level = "info", skip_all, fields(input = %input.display(), policy = ?options.policy))]
pub fn compute_from_path(input: &Path, options: &ValidationOptions) -> Result<GpaReport> {
    let table = excel_read::read_table(input)?;
    info!(rows = table.row_count(), "read grade sheet");
    compute_from_table(input, &table, options)
}

/// Runs the pipeline over an already loaded table. `source` is only recorded
/// in the report.
#[instrument(level = "debug", skip_all, fields(source = %source.display()))]
pub fn compute_from_table(
    source: &Path,
    table: &RawTable,
    options: &ValidationOptions,
) -> Result<GpaReport> {
    let columns = resolve_columns(&table.headers())?;
    let cleaned = clean_rows(table, &columns, options)?;
    debug!(
        records = cleaned.records.len(),
        dropped = cleaned.dropped_rows,
        "rows cleaned"
    );

    let result = aggregate(&cleaned.records);
    info!(
        courses = result.course_count,
        total_credits = result.total_credits,
        gpa = result.gpa,
        "computed GPA"
    );

    Ok(GpaReport {
        source: source.to_path_buf(),
        columns,
        records: cleaned.records,
        result,
        dropped_rows: cleaned.dropped_rows,
        warnings: cleaned.warnings,
    })
}

/// Persists the text summary of a finished report.
#[instrument(level = "info", skip_all, fields(output = %output.display(), ?locale))]
pub fn save_summary(output: &Path, report: &GpaReport, locale: Locale) -> Result<()> {
    summary_write::write_summary(output, report, locale)?;
    info!("summary written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpa::calculator::error::GpaError;
    use crate::gpa::calculator::model::CellValue;

    #[test]
    fn table_pipeline_matches_worked_example() {
        let table = RawTable::from_rows(
            vec!["课程名称".into(), "学分".into(), "绩点".into()],
            vec![
                vec![
                    CellValue::Text("线代".into()),
                    CellValue::Number(4.0),
                    CellValue::Number(4.0),
                ],
                vec![
                    CellValue::Text("英语".into()),
                    CellValue::Number(2.0),
                    CellValue::Number(3.5),
                ],
                vec![
                    CellValue::Text("体育".into()),
                    CellValue::Number(1.0),
                    CellValue::Empty,
                ],
            ],
        );

        let report =
            compute_from_table(Path::new("in.xlsx"), &table, &ValidationOptions::default())
                .unwrap();
        assert_eq!(report.result.course_count, 2);
        assert_eq!(report.dropped_rows, 1);
        assert!((report.result.gpa - 23.0 / 6.0).abs() < 1e-9);
        assert!(report.has_course_names());
    }

    #[test]
    fn missing_column_fails_before_validation() {
        let table = RawTable::from_rows(
            vec!["科目".into(), "分数".into()],
            vec![vec![CellValue::Text("数学".into()), CellValue::Number(90.0)]],
        );
        let err = compute_from_table(Path::new("in.xlsx"), &table, &ValidationOptions::default())
            .unwrap_err();
        assert!(matches!(err, GpaError::ColumnNotFound { .. }));
    }
}
