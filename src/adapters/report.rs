use crate::domain::model::{AnalysisOutcome, ProjectOverlap};
use crate::utils::error::{OverlapError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Csv,
    Json,
}

pub const REPORT_FORMATS: &[&str] = &["text", "csv", "json"];

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!(
                "unknown report format '{}', expected one of {}",
                other,
                REPORT_FORMATS.join(", ")
            )),
        }
    }
}

pub fn render(outcome: &AnalysisOutcome, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(outcome)),
        ReportFormat::Csv => render_csv(outcome),
        ReportFormat::Json => render_json(outcome),
    }
}

fn render_text(outcome: &AnalysisOutcome) -> String {
    let report = match outcome {
        AnalysisOutcome::NoOverlap => return "No 2 employees have worked together.\n".to_string(),
        AnalysisOutcome::Winner(report) => report,
    };

    let mut out = format!(
        "Employees which have worked the longest together are with IDs {} and {} with {} days.\n",
        report.pair.low, report.pair.high, report.max_overlap_days
    );
    out.push_str("Common projects for the longest working pair:\n");
    out.push_str("Employee ID #1, Employee ID #2, Project ID, Days Worked\n");
    for project in &report.projects {
        out.push_str(&format!(
            "{}, {}, {}, {}\n",
            project.employee1_id, project.employee2_id, project.project_id, project.overlap_days
        ));
    }
    if report.projects.len() > 1 {
        out.push_str(&format!("Total days worked together: {}\n", report.total_overlap_days));
    }
    out
}

/// The serialized outcome plus a `(project, days)` summary of the winner.
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    outcome: &'a AnalysisOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    shared_projects: Vec<ProjectOverlap>,
}

fn render_json(outcome: &AnalysisOutcome) -> Result<String> {
    let report = JsonReport {
        outcome,
        shared_projects: outcome
            .winner()
            .map(|report| report.shared_projects())
            .unwrap_or_default(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn render_csv(outcome: &AnalysisOutcome) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["employee1_id", "employee2_id", "project_id", "overlap_days"])?;
    if let Some(report) = outcome.winner() {
        for project in &report.projects {
            writer.write_record(&[
                project.employee1_id.to_string(),
                project.employee2_id.to_string(),
                project.project_id.to_string(),
                project.overlap_days.to_string(),
            ])?;
        }
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| OverlapError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
