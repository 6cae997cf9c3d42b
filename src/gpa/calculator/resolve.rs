//! Header → role resolution.
//!
//! Each role is described by a [`RoleRule`]: an ordered list of phases, each
//! phase a list of [`MatchRule`]s. Phases are tried in order and, within a
//! phase, headers are scanned in file order; the first header satisfying any
//! rule of the phase wins the role. A column claimed by an earlier role is
//! never reused by a later one.

use tracing::debug;

use crate::gpa::calculator::error::{GpaError, Result};
use crate::gpa::calculator::model::{ColumnRole, ColumnRoleMap, ResolvedColumn};

/// How a pattern is compared against a normalised (trimmed, lower-cased)
/// header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Contains,
}

#[derive(Debug, Clone, Copy)]
pub struct MatchRule {
    pub kind: MatchKind,
    pub patterns: &'static [&'static str],
}

impl MatchRule {
    pub fn matches(&self, normalized_header: &str) -> bool {
        self.patterns.iter().any(|pattern| match self.kind {
            MatchKind::Exact => normalized_header == *pattern,
            MatchKind::Contains => normalized_header.contains(pattern),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RoleRule {
    pub role: ColumnRole,
    pub required: bool,
    /// Names reported back to the user when a required role is missing.
    pub accepted: &'static [&'static str],
    pub phases: &'static [&'static [MatchRule]],
}

const CREDIT_PATTERNS: &[&str] = &["credit", "credits", "学分", "学时", "学分数"];
const COURSE_PATTERNS: &[&str] = &["course", "课程", "课程名称", "科目", "课程名"];

/// Resolution order matters: credit claims its column before grade point,
/// grade point before course name.
pub const ROLE_RULES: &[RoleRule] = &[
    RoleRule {
        role: ColumnRole::Credit,
        required: true,
        accepted: CREDIT_PATTERNS,
        phases: &[&[MatchRule {
            kind: MatchKind::Contains,
            patterns: CREDIT_PATTERNS,
        }]],
    },
    RoleRule {
        role: ColumnRole::GradePoint,
        required: true,
        accepted: &["绩点", "gpa", "grade", "绩点成绩"],
        phases: &[
            &[MatchRule {
                kind: MatchKind::Exact,
                patterns: &["绩点"],
            }],
            &[
                MatchRule {
                    kind: MatchKind::Exact,
                    patterns: &["gpa", "grade"],
                },
                MatchRule {
                    kind: MatchKind::Contains,
                    patterns: &["绩点"],
                },
            ],
        ],
    },
    RoleRule {
        role: ColumnRole::CourseName,
        required: false,
        accepted: COURSE_PATTERNS,
        phases: &[&[MatchRule {
            kind: MatchKind::Contains,
            patterns: COURSE_PATTERNS,
        }]],
    },
];

/// Maps the given headers onto the credit, grade-point and optional
/// course-name roles.
pub fn resolve_columns(headers: &[String]) -> Result<ColumnRoleMap> {
    resolve_with_rules(headers, ROLE_RULES)
}

/// Same as [`resolve_columns`] with a caller-supplied rule table. The table
/// must contain rules for the credit and grade-point roles.
pub fn resolve_with_rules(headers: &[String], rules: &[RoleRule]) -> Result<ColumnRoleMap> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize(h)).collect();
    let mut claimed: Vec<usize> = Vec::new();

    let mut credit = None;
    let mut grade_point = None;
    let mut course_name = None;

    for rule in rules {
        let found = find_column(&normalized, rule, &claimed);
        match found {
            Some(index) => {
                debug!(role = %rule.role, header = %headers[index], index, "resolved column");
                claimed.push(index);
                let column = ResolvedColumn {
                    index,
                    header: headers[index].clone(),
                };
                match rule.role {
                    ColumnRole::Credit => credit = Some(column),
                    ColumnRole::GradePoint => grade_point = Some(column),
                    ColumnRole::CourseName => course_name = Some(column),
                }
            }
            None if rule.required => return Err(missing(rule)),
            None => debug!(role = %rule.role, "optional column not present"),
        }
    }

    let credit = credit.ok_or_else(|| missing_role(rules, ColumnRole::Credit))?;
    let grade_point = grade_point.ok_or_else(|| missing_role(rules, ColumnRole::GradePoint))?;

    Ok(ColumnRoleMap {
        credit,
        grade_point,
        course_name,
    })
}

fn find_column(normalized: &[String], rule: &RoleRule, claimed: &[usize]) -> Option<usize> {
    rule.phases.iter().find_map(|phase| {
        normalized.iter().enumerate().position(|(idx, header)| {
            !claimed.contains(&idx) && phase.iter().any(|m| m.matches(header))
        })
    })
}

fn normalize(header: &str) -> String {
    header.trim().to_lowercase()
}

fn missing(rule: &RoleRule) -> GpaError {
    GpaError::ColumnNotFound {
        role: rule.role,
        accepted: rule.accepted.iter().map(|name| name.to_string()).collect(),
    }
}

fn missing_role(rules: &[RoleRule], role: ColumnRole) -> GpaError {
    match rules.iter().find(|rule| rule.role == role) {
        Some(rule) => missing(rule),
        None => GpaError::ColumnNotFound {
            role,
            accepted: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn resolves_chinese_headers() {
        let roles = resolve_columns(&headers(&["课程名称", "学分", "绩点"])).unwrap();
        assert_eq!(roles.credit.index, 1);
        assert_eq!(roles.grade_point.index, 2);
        assert_eq!(roles.course_name.map(|c| c.index), Some(0));
    }

    #[test]
    fn matching_ignores_case_and_whitespace() {
        let roles = resolve_columns(&headers(&["  Course Title", "CREDITS ", " GPA "])).unwrap();
        assert_eq!(roles.credit.header, "CREDITS ");
        assert_eq!(roles.grade_point.index, 2);
        assert_eq!(roles.course_name.map(|c| c.index), Some(0));
    }

    #[test]
    fn exact_grade_point_beats_earlier_alias() {
        let roles = resolve_columns(&headers(&["学分", "绩点成绩", "绩点"])).unwrap();
        assert_eq!(roles.grade_point.index, 2);
    }

    #[test]
    fn falls_back_to_alias_without_exact_column() {
        let roles = resolve_columns(&headers(&["credit", "grade"])).unwrap();
        assert_eq!(roles.grade_point.header, "grade");
        assert!(roles.course_name.is_none());
    }

    #[test]
    fn grade_aliases_are_exact_not_substrings() {
        let err = resolve_columns(&headers(&["credit", "grade level"])).unwrap_err();
        assert!(matches!(
            err,
            GpaError::ColumnNotFound {
                role: ColumnRole::GradePoint,
                ..
            }
        ));
    }

    #[test]
    fn first_matching_column_wins() {
        let roles = resolve_columns(&headers(&["学分", "学时", "gpa", "grade"])).unwrap();
        assert_eq!(roles.credit.index, 0);
        assert_eq!(roles.grade_point.index, 2);
    }

    #[test]
    fn claimed_columns_are_not_reused() {
        // "课程学分" is a credit column, so the course name falls to the next match.
        let roles = resolve_columns(&headers(&["课程学分", "绩点", "科目"])).unwrap();
        assert_eq!(roles.credit.index, 0);
        assert_eq!(roles.course_name.map(|c| c.index), Some(2));

        let roles = resolve_columns(&headers(&["学分绩点", "绩点"])).unwrap();
        assert_eq!(roles.credit.index, 0);
        assert_eq!(roles.grade_point.index, 1);
    }

    #[test]
    fn missing_credit_names_role_and_synonyms() {
        let err = resolve_columns(&headers(&["科目", "分数"])).unwrap_err();
        match err {
            GpaError::ColumnNotFound { role, accepted } => {
                assert_eq!(role, ColumnRole::Credit);
                assert!(accepted.contains(&"学分".to_string()));
                assert!(accepted.contains(&"credit".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let input = headers(&["课程", "学分数", "GPA", "备注"]);
        let first = resolve_columns(&input).unwrap();
        let second = resolve_columns(&input).unwrap();
        assert_eq!(first, second);
    }
}
