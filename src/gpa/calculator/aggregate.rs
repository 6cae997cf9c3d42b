use crate::gpa::calculator::model::{AggregateResult, CourseRecord};

/// Computes the credit-weighted grade-point average of `records`.
///
/// An empty slice (or one whose credits sum to zero) yields a GPA of `0.0`.
pub fn aggregate(records: &[CourseRecord]) -> AggregateResult {
    let (total_credits, total_weighted_points) = records
        .iter()
        .fold((0.0, 0.0), |(credits, weighted), record| {
            (credits + record.credit, weighted + record.weighted_points())
        });

    let gpa = if total_credits > 0.0 {
        total_weighted_points / total_credits
    } else {
        0.0
    };

    AggregateResult {
        course_count: records.len(),
        total_credits,
        total_weighted_points,
        gpa,
    }
}
