mod common;

use std::fs;

use common::{Cell, temp_workbook, worked_example_rows, write_workbook};
use gpa_calculator::GpaError;
use gpa_calculator::report::Locale;
use gpa_calculator::session::{GpaSession, Notice, SessionCommand};

#[test]
fn pick_compute_save_flow() {
    let (dir, path) = temp_workbook(
        "grades.xlsx",
        &["课程名称", "学分", "绩点"],
        &worked_example_rows(),
    );
    let mut session = GpaSession::new(Locale::En);

    session
        .dispatch(SessionCommand::PickFile(Some(path.clone())))
        .expect("file accepted");
    assert!(session.can_compute());
    assert!(!session.can_save());

    let notices = session.dispatch(SessionCommand::Compute).expect("computed");
    assert_eq!(notices.len(), 1);
    assert!(matches!(&notices[0], Notice::Warning(text) if text.contains("ignored 1 row")));
    assert_eq!(session.headline(), "GPA: 3.8333 (excellent)");
    assert!(session.panel_text().contains("Grade distribution:"));

    let output = dir.path().join("result.txt");
    let notices = session
        .dispatch(SessionCommand::Save(Some(output.clone())))
        .expect("saved");
    assert!(matches!(&notices[0], Notice::Info(text) if text.contains("result.txt")));
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, session.panel_text());
}

#[test]
fn failed_compute_keeps_previous_report() {
    let (_dir, path) = temp_workbook(
        "grades.xlsx",
        &["课程名称", "学分", "绩点"],
        &worked_example_rows(),
    );
    let mut session = GpaSession::new(Locale::Zh);
    session
        .dispatch(SessionCommand::PickFile(Some(path.clone())))
        .unwrap();
    session.dispatch(SessionCommand::Compute).unwrap();
    let before = session.report().cloned().expect("report present");

    write_workbook(&path, &["科目", "分数"], &[vec![Cell::Text("数学"), Cell::Number(90.0)]]);
    let err = session.dispatch(SessionCommand::Compute).unwrap_err();

    assert!(matches!(err, GpaError::ColumnNotFound { .. }));
    assert_eq!(session.report(), Some(&before));
}

#[test]
fn picking_a_new_file_clears_results_but_clear_keeps_file() {
    let (dir, path) = temp_workbook(
        "grades.xlsx",
        &["学分", "绩点"],
        &[vec![Cell::Number(2.0), Cell::Number(3.0)]],
    );
    let other = dir.path().join("other.xlsx");
    write_workbook(&other, &["学分", "绩点"], &[vec![Cell::Number(1.0), Cell::Number(4.0)]]);

    let mut session = GpaSession::default();
    session.dispatch(SessionCommand::PickFile(Some(path))).unwrap();
    session.dispatch(SessionCommand::Compute).unwrap();
    assert!(session.can_save());

    session.dispatch(SessionCommand::Clear).unwrap();
    assert!(!session.can_save());
    assert!(session.can_compute());

    session.dispatch(SessionCommand::Compute).unwrap();
    session
        .dispatch(SessionCommand::PickFile(Some(other.clone())))
        .unwrap();
    assert!(session.report().is_none());
    assert_eq!(session.file(), Some(other.as_path()));
}

#[test]
fn non_xlsx_pick_is_rejected_and_state_kept() {
    let (dir, path) = temp_workbook(
        "grades.xlsx",
        &["学分", "绩点"],
        &[vec![Cell::Number(2.0), Cell::Number(3.0)]],
    );
    let csv = dir.path().join("grades.csv");
    fs::write(&csv, "学分,绩点\n").unwrap();

    let mut session = GpaSession::default();
    session
        .dispatch(SessionCommand::PickFile(Some(path.clone())))
        .unwrap();
    let err = session
        .dispatch(SessionCommand::PickFile(Some(csv)))
        .unwrap_err();

    assert!(matches!(err, GpaError::UnsupportedFormat(_)));
    assert_eq!(session.file(), Some(path.as_path()));
}

#[test]
fn desktop_session_filters_non_positive_credit() {
    let (_dir, path) = temp_workbook(
        "grades.xlsx",
        &["学分", "绩点"],
        &[
            vec![Cell::Number(3.0), Cell::Number(4.0)],
            vec![Cell::Number(0.0), Cell::Number(2.0)],
            vec![Cell::Number(1.0), Cell::Number(-1.0)],
        ],
    );

    let mut session = GpaSession::default();
    session.dispatch(SessionCommand::PickFile(Some(path))).unwrap();
    session.dispatch(SessionCommand::Compute).expect("lenient compute");

    let report = session.report().expect("report present");
    assert_eq!(report.result.course_count, 1);
    assert_eq!(report.dropped_rows, 2);
    assert!((report.result.gpa - 4.0).abs() < 1e-9);
}
