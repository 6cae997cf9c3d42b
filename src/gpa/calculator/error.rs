use std::path::PathBuf;

use thiserror::Error;

use crate::gpa::calculator::model::ColumnRole;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, GpaError>;

/// Error type covering the different failure cases that can occur while a
/// grade sheet is loaded, validated, aggregated, or saved.
#[derive(Debug, Error)]
pub enum GpaError {
    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Raised for a wrong file extension or a workbook calamine cannot parse.
    #[error("unsupported spreadsheet: {0}")]
    UnsupportedFormat(String),

    /// Raised when a mandatory column role has no matching header.
    #[error("no {role} column found; expected a header matching one of: {}", .accepted.join(", "))]
    ColumnNotFound {
        role: ColumnRole,
        accepted: Vec<String>,
    },

    /// Raised when no usable rows remain or a value fails validation.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Raised when the session is asked to compute before a file was chosen.
    #[error("no spreadsheet selected")]
    NoFileSelected,

    /// Raised when the session is asked to save before anything was computed.
    #[error("there are no results to save yet")]
    NoResults,

    /// Wrapper for IO failures such as writing summary files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl GpaError {
    /// Shorthand for the "nothing survived cleaning" failure.
    pub fn no_valid_rows() -> Self {
        GpaError::InvalidData("no valid rows".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_not_found_lists_synonyms() {
        let error = GpaError::ColumnNotFound {
            role: ColumnRole::Credit,
            accepted: vec!["credit".into(), "学分".into()],
        };
        let message = error.to_string();
        assert!(message.contains("credit column"));
        assert!(message.contains("credit, 学分"));
    }
}
