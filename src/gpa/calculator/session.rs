//! Toolkit-independent state behind the desktop front end.
//!
//! The GUI translates button presses and dialog results into
//! [`SessionCommand`]s and renders whatever [`GpaSession`] exposes afterwards.
//! A command that fails leaves the session exactly as it was.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::gpa::calculator::error::{GpaError, Result};
use crate::gpa::calculator::io::{excel_read, summary_write};
use crate::gpa::calculator::model::GpaReport;
use crate::gpa::calculator::pipeline;
use crate::gpa::calculator::report::{self, Locale};
use crate::gpa::calculator::validate::{ValidationOptions, ValidationPolicy};

const WELCOME_ZH: &str = "欢迎使用GPA计算器！

使用说明：
1. 输入或粘贴成绩Excel文件（.xlsx）的路径并点击\"选择文件\"
   （路径会在选择时检查，只接受 .xlsx 文件）
2. 确保文件包含\"学分\"和\"绩点\"列
3. 点击\"计算GPA\"获得结果
4. 可以保存计算结果到文本文件

支持的列名：
• 学分列：学分、学时、credit等
• 绩点列：绩点、gpa、grade等
• 课程名：课程、课程名称、科目（可选）
";

const WELCOME_EN: &str = "Welcome to the GPA calculator!

How to use:
1. Enter the path of your grade workbook (.xlsx) and press \"Open\"
   (the path is checked when opened; only .xlsx files are accepted)
2. Make sure the sheet has credit and grade-point columns
3. Press \"Compute GPA\" to see the result
4. Results can be saved to a text file

Recognised headers:
• credit: credit, credits, 学分, 学时
• grade point: 绩点, gpa, grade
• course name (optional): course, 课程, 科目
";

/// User intent, already resolved from widgets and dialogs. `None` paths mean
/// the dialog was cancelled.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    PickFile(Option<PathBuf>),
    Compute,
    Clear,
    Save(Option<PathBuf>),
}

/// Non-fatal message for the user after a successful command.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Warning(String),
}

#[derive(Debug)]
pub struct GpaSession {
    locale: Locale,
    options: ValidationOptions,
    file: Option<PathBuf>,
    report: Option<GpaReport>,
}

impl Default for GpaSession {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl GpaSession {
    /// Creates a session using the lenient validation policy the desktop
    /// front end has always applied.
    pub fn new(locale: Locale) -> Self {
        Self::with_options(locale, ValidationOptions::with_policy(ValidationPolicy::Lenient))
    }

    pub fn with_options(locale: Locale, options: ValidationOptions) -> Self {
        Self {
            locale,
            options,
            file: None,
            report: None,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn report(&self) -> Option<&GpaReport> {
        self.report.as_ref()
    }

    pub fn can_compute(&self) -> bool {
        self.file.is_some()
    }

    pub fn can_save(&self) -> bool {
        self.report.is_some()
    }

    /// Headline text: the GPA with its band, or a waiting message.
    pub fn headline(&self) -> String {
        match (&self.report, self.locale) {
            (Some(report), locale) => report::render_headline(&report.result, locale),
            (None, Locale::Zh) => "等待计算...".to_string(),
            (None, Locale::En) => "Waiting for a computation...".to_string(),
        }
    }

    /// Detail panel text: the full breakdown, or usage instructions.
    pub fn panel_text(&self) -> String {
        match (&self.report, self.locale) {
            (Some(report), locale) => report::render_panel(report, locale),
            (None, Locale::Zh) => WELCOME_ZH.to_string(),
            (None, Locale::En) => WELCOME_EN.to_string(),
        }
    }

    /// Applies one command. On error the session state is unchanged.
    #[instrument(level = "debug", skip(self))]
    pub fn dispatch(&mut self, command: SessionCommand) -> Result<Vec<Notice>> {
        match command {
            SessionCommand::PickFile(None) | SessionCommand::Save(None) => Ok(Vec::new()),
            SessionCommand::PickFile(Some(path)) => self.pick_file(path),
            SessionCommand::Compute => self.compute(),
            SessionCommand::Clear => {
                self.report = None;
                Ok(Vec::new())
            }
            SessionCommand::Save(Some(path)) => self.save(&path),
        }
    }

    fn pick_file(&mut self, path: PathBuf) -> Result<Vec<Notice>> {
        excel_read::check_input_path(&path)?;
        info!(file = %path.display(), "spreadsheet selected");
        self.file = Some(path);
        self.report = None;
        Ok(Vec::new())
    }

    fn compute(&mut self) -> Result<Vec<Notice>> {
        let file = self.file.as_deref().ok_or(GpaError::NoFileSelected)?;
        let report = pipeline::compute_from_path(file, &self.options)?;
        let notices = report::render_warnings(&report.warnings, self.locale)
            .into_iter()
            .map(Notice::Warning)
            .collect();
        self.report = Some(report);
        Ok(notices)
    }

    fn save(&self, path: &Path) -> Result<Vec<Notice>> {
        if self.report.is_none() {
            return Err(GpaError::NoResults);
        }
        summary_write::write_text(path, &self.panel_text())?;
        Ok(vec![Notice::Info(format!(
            "{}: {}",
            self.locale.labels().saved_to,
            path.display()
        ))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_cannot_compute_or_save() {
        let mut session = GpaSession::new(Locale::En);
        assert!(!session.can_compute());
        assert!(!session.can_save());
        assert!(session.panel_text().contains("Welcome"));
        assert!(session.panel_text().contains("only .xlsx files are accepted"));
        assert!(matches!(
            session.dispatch(SessionCommand::Compute),
            Err(GpaError::NoFileSelected)
        ));
        assert!(matches!(
            session.dispatch(SessionCommand::Save(Some(PathBuf::from("out.txt")))),
            Err(GpaError::NoResults)
        ));
    }

    #[test]
    fn cancelled_dialogs_change_nothing() {
        let mut session = GpaSession::default();
        assert!(session.dispatch(SessionCommand::PickFile(None)).unwrap().is_empty());
        assert!(session.dispatch(SessionCommand::Save(None)).unwrap().is_empty());
        assert!(session.file().is_none());
        assert_eq!(session.headline(), "等待计算...");
        assert!(session.panel_text().contains("只接受 .xlsx 文件"));
    }

    #[test]
    fn picking_a_missing_file_is_rejected() {
        let mut session = GpaSession::default();
        let err = session
            .dispatch(SessionCommand::PickFile(Some(PathBuf::from(
                "/definitely/not/here.xlsx",
            ))))
            .unwrap_err();
        assert!(matches!(err, GpaError::FileNotFound(_)));
        assert!(!session.can_compute());
    }
}
