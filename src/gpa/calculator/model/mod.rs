use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell after it has been read from the workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    /// Free-form text.
    Text(String),
    /// Integer or floating point number.
    Number(f64),
    /// Blank cell, or a cell holding a spreadsheet error such as `#N/A`.
    Empty,
}

impl CellValue {
    /// Returns `true` for blank cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(value) => value.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Attempts a numeric reading of the cell. Text is trimmed before parsing;
    /// non-finite results count as failures.
    pub fn to_number(&self) -> Option<f64> {
        let value = match self {
            CellValue::Number(value) => *value,
            CellValue::Text(value) => value.trim().parse::<f64>().ok()?,
            CellValue::Empty => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Renders the cell as display text, `None` when blank.
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Text(value) => {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            CellValue::Number(value) => Some(value.to_string()),
            CellValue::Empty => None,
        }
    }
}

/// A named column of a [`RawTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

/// Sheet contents as read from disk: ordered named columns of equal length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<Column>,
    row_count: usize,
    /// 0-based sheet row holding the headers.
    header_row: usize,
}

impl RawTable {
    /// Builds a table from a header row and data rows. Short rows are padded
    /// with [`CellValue::Empty`]; cells beyond the header width are ignored.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let row_count = rows.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column {
                name,
                cells: Vec::with_capacity(row_count),
            })
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.cells.push(cells.next().unwrap_or(CellValue::Empty));
            }
        }

        Self {
            columns,
            row_count,
            header_row: 0,
        }
    }

    /// Records where the header row sits on the sheet, for tables whose used
    /// range does not start at the first row.
    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row;
        self
    }

    /// Column headers in file order.
    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|column| column.name.clone()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// 1-based sheet row of data row `row`.
    pub fn sheet_row(&self, row: usize) -> usize {
        self.header_row + row + 2
    }

    /// Returns the cell at the given position, [`CellValue::Empty`] when the
    /// position is outside the table.
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.columns
            .get(column)
            .and_then(|column| column.cells.get(row))
            .unwrap_or(&CellValue::Empty)
    }
}

/// Semantic meaning assigned to a resolved spreadsheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnRole {
    Credit,
    GradePoint,
    CourseName,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Credit => write!(f, "credit"),
            ColumnRole::GradePoint => write!(f, "grade-point"),
            ColumnRole::CourseName => write!(f, "course-name"),
        }
    }
}

/// A header matched to a role: the column index and the header text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedColumn {
    pub index: usize,
    pub header: String,
}

/// Role → column assignment produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoleMap {
    pub credit: ResolvedColumn,
    pub grade_point: ResolvedColumn,
    pub course_name: Option<ResolvedColumn>,
}

/// A validated course row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub name: Option<String>,
    pub credit: f64,
    pub grade_point: f64,
    /// 1-based spreadsheet row the record was read from.
    pub row: usize,
}

impl CourseRecord {
    pub fn weighted_points(&self) -> f64 {
        self.credit * self.grade_point
    }
}

/// Totals derived from a set of course records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateResult {
    pub course_count: usize,
    pub total_credits: f64,
    pub total_weighted_points: f64,
    pub gpa: f64,
}

/// Non-fatal issue reported alongside a successful result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationWarning {
    /// Rows removed because credit or grade point was missing or unusable.
    RowsDropped { count: usize },
    /// Cells in the credit or grade-point column that were not numeric.
    CoercionFailures { count: usize },
    /// A retained grade point outside the expected band.
    GradeOutOfRange { row: usize, value: f64 },
}

/// Everything one run of the pipeline produced for a single sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaReport {
    pub source: PathBuf,
    pub columns: ColumnRoleMap,
    pub records: Vec<CourseRecord>,
    pub result: AggregateResult,
    pub dropped_rows: usize,
    pub warnings: Vec<ValidationWarning>,
}

impl GpaReport {
    /// Whether the sheet had a course-name column.
    pub fn has_course_names(&self) -> bool {
        self.columns.course_name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_pads_short_rows_and_ignores_extra_cells() {
        let table = RawTable::from_rows(
            vec!["a".into(), "b".into()],
            vec![
                vec![CellValue::Number(1.0)],
                vec![
                    CellValue::Number(2.0),
                    CellValue::Text("x".into()),
                    CellValue::Number(9.0),
                ],
            ],
        );

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns().len(), 2);
        assert_eq!(table.cell(0, 1), &CellValue::Empty);
        assert_eq!(table.cell(1, 1), &CellValue::Text("x".into()));
        assert_eq!(table.cell(5, 5), &CellValue::Empty);
    }

    #[test]
    fn sheet_rows_follow_the_header_position() {
        let table = RawTable::from_rows(vec!["a".into()], vec![vec![CellValue::Number(1.0)]]);
        assert_eq!(table.sheet_row(0), 2);

        let shifted = table.with_header_row(3);
        assert_eq!(shifted.sheet_row(0), 5);
        assert_eq!(shifted.sheet_row(2), 7);
    }

    #[test]
    fn numeric_reading_trims_text_and_rejects_garbage() {
        assert_eq!(CellValue::Text(" 3.5 ".into()).to_number(), Some(3.5));
        assert_eq!(CellValue::Text("A+".into()).to_number(), None);
        assert_eq!(CellValue::Text("NaN".into()).to_number(), None);
        assert_eq!(CellValue::Empty.to_number(), None);
        assert!(CellValue::Text("   ".into()).is_blank());
    }
}
