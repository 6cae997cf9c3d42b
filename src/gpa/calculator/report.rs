//! Text and JSON renderings of a [`GpaReport`].

use std::fmt::Write;
use std::str::FromStr;

use serde::Serialize;

use crate::gpa::calculator::error::{GpaError, Result};
use crate::gpa::calculator::model::{AggregateResult, CourseRecord, GpaReport, ValidationWarning};

/// Language used for user-facing labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Zh,
    En,
}

/// Label set for one locale.
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub course_name: &'static str,
    pub course_index: &'static str,
    pub course_prefix: &'static str,
    pub credit: &'static str,
    pub grade_point: &'static str,
    pub weighted: &'static str,
    pub course_count: &'static str,
    pub courses_unit: &'static str,
    pub total_credits: &'static str,
    pub total_weighted: &'static str,
    pub gpa: &'static str,
    pub source: &'static str,
    pub analysis: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub saved_to: &'static str,
    pub excellent: &'static str,
    pub good: &'static str,
    pub passing: &'static str,
    pub needs_improvement: &'static str,
    pub tier_excellent: &'static str,
    pub tier_good: &'static str,
    pub tier_average: &'static str,
    pub tier_poor: &'static str,
}

const ZH: Labels = Labels {
    title: "GPA计算结果",
    course_name: "课程名称",
    course_index: "课程序号",
    course_prefix: "课程",
    credit: "学分",
    grade_point: "绩点",
    weighted: "权重分数",
    course_count: "课程总数",
    courses_unit: "门",
    total_credits: "总学分",
    total_weighted: "总权重分数",
    gpa: "平均学分绩点(GPA)",
    source: "文件",
    analysis: "成绩分析",
    error: "错误",
    warning: "警告",
    saved_to: "结果已保存到",
    excellent: "优秀",
    good: "良好",
    passing: "及格",
    needs_improvement: "需努力",
    tier_excellent: "优秀 (绩点≥4.0)",
    tier_good: "良好 (3.0≤绩点<4.0)",
    tier_average: "一般 (2.0≤绩点<3.0)",
    tier_poor: "待提升 (绩点<2.0)",
};

const EN: Labels = Labels {
    title: "GPA Results",
    course_name: "Course",
    course_index: "No.",
    course_prefix: "Course ",
    credit: "Credit",
    grade_point: "Grade",
    weighted: "Weighted",
    course_count: "Courses",
    courses_unit: "",
    total_credits: "Total credits",
    total_weighted: "Total weighted points",
    gpa: "Grade point average (GPA)",
    source: "File",
    analysis: "Grade distribution",
    error: "error",
    warning: "warning",
    saved_to: "Results saved to",
    excellent: "excellent",
    good: "good",
    passing: "passing",
    needs_improvement: "needs improvement",
    tier_excellent: "Excellent (grade ≥ 4.0)",
    tier_good: "Good (3.0 ≤ grade < 4.0)",
    tier_average: "Average (2.0 ≤ grade < 3.0)",
    tier_poor: "Needs work (grade < 2.0)",
};

impl Locale {
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::Zh => &ZH,
            Locale::En => &EN,
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "cn" => Ok(Locale::Zh),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(format!("unknown language '{other}', expected zh or en")),
        }
    }
}

/// Qualitative band of an overall GPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GpaBand {
    Excellent,
    Good,
    Passing,
    NeedsImprovement,
}

impl GpaBand {
    pub fn classify(gpa: f64) -> Self {
        if gpa >= 3.5 {
            GpaBand::Excellent
        } else if gpa >= 3.0 {
            GpaBand::Good
        } else if gpa >= 2.5 {
            GpaBand::Passing
        } else {
            GpaBand::NeedsImprovement
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        let labels = locale.labels();
        match self {
            GpaBand::Excellent => labels.excellent,
            GpaBand::Good => labels.good,
            GpaBand::Passing => labels.passing,
            GpaBand::NeedsImprovement => labels.needs_improvement,
        }
    }
}

/// Per-course grade-point tiers shown in the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GradeDistribution {
    pub excellent: usize,
    pub good: usize,
    pub average: usize,
    pub poor: usize,
}

impl GradeDistribution {
    pub fn from_records(records: &[CourseRecord]) -> Self {
        records.iter().fold(Self::default(), |mut dist, record| {
            match record.grade_point {
                g if g >= 4.0 => dist.excellent += 1,
                g if g >= 3.0 => dist.good += 1,
                g if g >= 2.0 => dist.average += 1,
                _ => dist.poor += 1,
            }
            dist
        })
    }
}

const RULE_WIDE: usize = 60;
const RULE_NARROW: usize = 50;

/// Console table of courses followed by the totals.
pub fn render_console(report: &GpaReport, locale: Locale) -> String {
    let labels = locale.labels();
    let mut output = String::new();

    let _ = writeln!(output, "{}", "=".repeat(RULE_WIDE));
    let _ = writeln!(output, "{:^width$}", labels.title, width = RULE_WIDE);
    let _ = writeln!(output, "{}", "=".repeat(RULE_WIDE));
    let _ = writeln!(output);
    write_course_table(&mut output, report, labels, 20);
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", "-".repeat(RULE_WIDE));
    write_totals(&mut output, &report.result, labels);
    let _ = writeln!(output, "{}", "=".repeat(RULE_WIDE));

    output
}

/// Detail text for the GUI: the console table plus the grade distribution.
pub fn render_panel(report: &GpaReport, locale: Locale) -> String {
    let labels = locale.labels();
    let mut output = render_console(report, locale);
    let dist = GradeDistribution::from_records(&report.records);

    let _ = writeln!(output);
    let _ = writeln!(output, "{}:", labels.analysis);
    for (tier, count) in [
        (labels.tier_excellent, dist.excellent),
        (labels.tier_good, dist.good),
        (labels.tier_average, dist.average),
        (labels.tier_poor, dist.poor),
    ] {
        let _ = writeln!(output, "  {tier}: {count} {}", labels.courses_unit);
    }

    output
}

/// One-line GPA summary with its band, e.g. `GPA: 3.8333 (优秀)`.
pub fn render_headline(result: &AggregateResult, locale: Locale) -> String {
    let band = GpaBand::classify(result.gpa);
    format!("GPA: {:.4} ({})", result.gpa, band.label(locale))
}

/// Plain-text summary persisted by `--output`.
pub fn render_summary_file(report: &GpaReport, locale: Locale) -> String {
    let labels = locale.labels();
    let mut output = String::new();
    let _ = writeln!(output, "{}", labels.title);
    let _ = writeln!(output, "{}: {}", labels.source, report.source.display());
    write_totals(&mut output, &report.result, labels);
    output
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a GpaReport,
    band: GpaBand,
    distribution: GradeDistribution,
}

/// Pretty JSON rendering of the report, including band and distribution.
pub fn render_json(report: &GpaReport) -> Result<String> {
    let payload = JsonReport {
        report,
        band: GpaBand::classify(report.result.gpa),
        distribution: GradeDistribution::from_records(&report.records),
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Compact JSON printed in place of a report when a run fails: a zero GPA
/// plus the error message.
pub fn render_failure_json(error: &GpaError) -> String {
    serde_json::json!({ "gpa": 0.0, "error": error.to_string() }).to_string()
}

/// Human-readable lines for the non-fatal issues of a run.
pub fn render_warnings(warnings: &[ValidationWarning], locale: Locale) -> Vec<String> {
    let zh = locale == Locale::Zh;
    warnings
        .iter()
        .map(|warning| match (warning, zh) {
            (ValidationWarning::RowsDropped { count }, true) => {
                format!("已忽略 {count} 行无效数据（学分或绩点为空/非数字）")
            }
            (ValidationWarning::RowsDropped { count }, false) => {
                format!("ignored {count} row(s) with missing or non-numeric credit/grade point")
            }
            (ValidationWarning::CoercionFailures { count }, true) => {
                format!("{count} 个单元格无法转换为数字")
            }
            (ValidationWarning::CoercionFailures { count }, false) => {
                format!("{count} cell(s) could not be read as numbers")
            }
            (ValidationWarning::GradeOutOfRange { row, value }, true) => {
                format!("第 {row} 行绩点 {value} 超出常规范围，请检查数据是否正确")
            }
            (ValidationWarning::GradeOutOfRange { row, value }, false) => {
                format!("grade point {value} on row {row} is outside the usual range")
            }
        })
        .collect()
}

/// Error line as shown to the user.
pub fn render_error(error: &GpaError, locale: Locale) -> String {
    format!("{}: {error}", locale.labels().error)
}

fn write_course_table(output: &mut String, report: &GpaReport, labels: &Labels, name_width: usize) {
    let first_header = if report.has_course_names() {
        labels.course_name
    } else {
        labels.course_index
    };
    let _ = writeln!(
        output,
        "{:<name_width$} {:<8} {:<8} {:<10}",
        first_header, labels.credit, labels.grade_point, labels.weighted
    );
    let _ = writeln!(output, "{}", "-".repeat(RULE_NARROW));

    for (idx, record) in report.records.iter().enumerate() {
        let name = match &record.name {
            Some(name) if report.has_course_names() => truncate(name, name_width),
            _ => format!("{}{}", labels.course_prefix, idx + 1),
        };
        let _ = writeln!(
            output,
            "{:<name_width$} {:<8.1} {:<8.2} {:<10.2}",
            name,
            record.credit,
            record.grade_point,
            record.weighted_points()
        );
    }
}

fn write_totals(output: &mut String, result: &AggregateResult, labels: &Labels) {
    let _ = writeln!(
        output,
        "{}: {} {}",
        labels.course_count, result.course_count, labels.courses_unit
    );
    let _ = writeln!(output, "{}: {:.1}", labels.total_credits, result.total_credits);
    let _ = writeln!(
        output,
        "{}: {:.2}",
        labels.total_weighted, result.total_weighted_points
    );
    let _ = writeln!(output, "{}: {:.4}", labels.gpa, result.gpa);
}

fn truncate(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}
