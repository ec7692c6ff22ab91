//! Common utilities shared across report generators.

use crate::facts::{Metric, ReportRow};

/// Shown wherever a metric value could not be obtained.
pub const UNRESOLVED_PLACEHOLDER: &str = "?";

/// Columns preceding the metric columns in every tabular report.
pub const FIXED_COLUMNS: [&str; 3] = ["Artifact", "Version", "Scope"];

/// Title used for a project, e.g. `Simple Report for my-app 1.0.0`.
#[must_use]
pub fn report_title(project: &str) -> String {
    let project = project.trim();
    if project.is_empty() {
        "Simple Report".to_string()
    } else {
        format!("Simple Report for {project}")
    }
}

/// The text for a metric cell, substituting the placeholder for unresolved values.
#[must_use]
pub fn display_value(value: Option<&str>) -> &str {
    value.unwrap_or(UNRESOLVED_PLACEHOLDER)
}

/// All text cells of a row, in column order.
pub fn row_cells<'a>(row: &'a ReportRow, metrics: &'a [Metric]) -> impl Iterator<Item = String> + 'a {
    [row.display_name(), row.version().to_string(), row.scope().to_string()]
        .into_iter()
        .chain(row.values(metrics).map(|value| display_value(value).to_string()))
}
