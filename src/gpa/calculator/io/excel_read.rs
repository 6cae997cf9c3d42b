use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::gpa::calculator::error::{GpaError, Result};
use crate::gpa::calculator::model::{CellValue, RawTable};

/// File extension accepted by the loader, compared case-insensitively.
pub const SPREADSHEET_EXTENSION: &str = "xlsx";

/// Checks that `path` exists and carries the spreadsheet extension.
pub fn check_input_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(GpaError::FileNotFound(path.to_path_buf()));
    }
    if !has_spreadsheet_extension(path) {
        return Err(GpaError::UnsupportedFormat(format!(
            "expected a .{SPREADSHEET_EXTENSION} file, got {}",
            path.display()
        )));
    }
    Ok(())
}

pub fn has_spreadsheet_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SPREADSHEET_EXTENSION))
}

/// Reads the first worksheet of an `.xlsx` workbook. The first row of the used
/// range supplies the headers, every following row is data.
pub fn read_table(path: &Path) -> Result<RawTable> {
    check_input_path(path)?;

    let mut workbook = open_workbook::<Xlsx<_>, _>(path).map_err(unparseable)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| GpaError::UnsupportedFormat("workbook has no worksheets".into()))?
        .map_err(unparseable)?;

    // The used range starts at the first non-empty cell, not at A1.
    let header_row = range.start().map_or(0, |(row, _)| row as usize);
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(first_row) => first_row
            .iter()
            .enumerate()
            .map(|(idx, cell)| header_name(idx, cell))
            .collect(),
        None => Vec::new(),
    };

    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect();

    debug!(
        columns = headers.len(),
        rows = data.len(),
        header_row,
        "read first worksheet"
    );
    Ok(RawTable::from_rows(headers, data).with_header_row(header_row))
}

fn unparseable(error: calamine::XlsxError) -> GpaError {
    GpaError::UnsupportedFormat(format!("could not read workbook: {error}"))
}

fn header_name(idx: usize, cell: &DataType) -> String {
    match cell_to_value(cell).to_text() {
        Some(name) => name,
        None => format!("Unnamed: {idx}"),
    }
}

fn cell_to_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(value) => CellValue::Text(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Bool(value) => CellValue::Text(value.to_string()),
        DataType::Empty | DataType::Error(_) => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}
