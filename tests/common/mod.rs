#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

pub enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

/// Writes a single-sheet workbook with a header row followed by `rows`.
pub fn write_workbook(path: &Path, headers: &[&str], rows: &[Vec<Cell>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_idx, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, *header)
            .expect("header written");
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let col_num = col_idx as u16;
            match cell {
                Cell::Text(value) => {
                    worksheet
                        .write_string(row_num, col_num, *value)
                        .expect("text cell written");
                }
                Cell::Number(value) => {
                    worksheet
                        .write_number(row_num, col_num, *value)
                        .expect("number cell written");
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save(path).expect("workbook saved");
}

/// Creates a workbook inside a fresh temporary directory.
pub fn temp_workbook(name: &str, headers: &[&str], rows: &[Vec<Cell>]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join(name);
    write_workbook(&path, headers, rows);
    (dir, path)
}

pub fn worked_example_rows() -> Vec<Vec<Cell>> {
    vec![
        vec![Cell::Text("线代"), Cell::Number(4.0), Cell::Number(4.0)],
        vec![Cell::Text("英语"), Cell::Number(2.0), Cell::Number(3.5)],
        vec![Cell::Text("体育"), Cell::Number(1.0), Cell::Blank],
    ]
}
