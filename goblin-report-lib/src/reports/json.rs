use super::Report;
use crate::Result;
use crate::facts::ReportRow;
use core::fmt::Write;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    columns: Vec<&'a str>,
    rows: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    name: String,
    link: Option<&'a str>,
    version: &'a str,
    scope: &'a str,
    metrics: JsonMetrics<'a>,
}

/// Metric values keyed by name, written in column order.
struct JsonMetrics<'a> {
    report: &'a Report<'a>,
    row: &'a ReportRow,
}

impl Serialize for JsonMetrics<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.report.metrics.len()))?;
        for (metric, value) in self.report.metrics.iter().zip(self.row.values(self.report.metrics)) {
            map.serialize_entry(metric.name(), &value)?;
        }
        map.end()
    }
}

/// Write the report as JSON. Unresolved values are `null` rather than a placeholder.
///
/// Keys of each row's `metrics` object appear in the same order as the metric columns.
pub fn generate<W: Write>(report: &Report<'_>, writer: &mut W) -> Result<()> {
    let document = JsonReport {
        title: report.title,
        columns: report.columns().collect(),
        rows: report
            .rows
            .iter()
            .map(|row| JsonRow {
                name: row.display_name(),
                link: row.link(),
                version: row.version(),
                scope: row.scope(),
                metrics: JsonMetrics { report, row },
            })
            .collect(),
    };

    let text = serde_json::to_string_pretty(&document)?;
    writeln!(writer, "{text}")?;
    Ok(())
}
