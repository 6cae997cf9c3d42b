use std::fs;
use std::path::Path;

use crate::gpa::calculator::error::Result;
use crate::gpa::calculator::model::GpaReport;
use crate::gpa::calculator::report::{self, Locale};

/// Writes the plain-text summary of `report` to `path`, replacing any
/// existing file.
pub fn write_summary(path: &Path, report: &GpaReport, locale: Locale) -> Result<()> {
    write_text(path, &report::render_summary_file(report, locale))
}

/// Writes arbitrary result text, such as the GUI detail panel, to `path`.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)?;
    Ok(())
}
