use super::Report;
use super::common::{UNRESOLVED_PLACEHOLDER, row_cells};
use crate::Result;
use core::fmt::Write;
use owo_colors::OwoColorize;

const COLUMN_GAP: &str = "  ";

pub fn generate<W: Write>(report: &Report<'_>, use_colors: bool, writer: &mut W) -> Result<()> {
    let header: Vec<&str> = report.columns().collect();
    let rows: Vec<Vec<String>> = report.rows.iter().map(|row| row_cells(row, report.metrics).collect()).collect();

    let mut widths: Vec<usize> = header.iter().map(|title| title.chars().count()).collect();
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    if use_colors {
        writeln!(writer, "{}", report.title.bold())?;
    } else {
        writeln!(writer, "{}", report.title)?;
    }
    writeln!(writer)?;

    let header_line = join_padded(header.iter().copied(), &widths);
    if use_colors {
        writeln!(writer, "{}", header_line.bold())?;
    } else {
        writeln!(writer, "{header_line}")?;
    }

    let rule_len = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
    writeln!(writer, "{}", "─".repeat(rule_len))?;

    for cells in &rows {
        let last = cells.len().saturating_sub(1);
        for (index, (cell, width)) in cells.iter().zip(&widths).enumerate() {
            if index > 0 {
                write!(writer, "{COLUMN_GAP}")?;
            }

            let padded = if index == last { cell.clone() } else { format!("{cell:<width$}") };
            if use_colors && cell == UNRESOLVED_PLACEHOLDER {
                write!(writer, "{}", padded.yellow())?;
            } else {
                write!(writer, "{padded}")?;
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let cells: Vec<&str> = cells.collect();
    let last = cells.len().saturating_sub(1);
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (cell, width))| if index == last { (*cell).to_string() } else { format!("{cell:<width$}") })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{Artifact, Metric, MetricKind, MetricResult, ReportRow};

    fn metrics() -> Vec<Metric> {
        vec![Metric::from(MetricKind::CveAggregated), Metric::from(MetricKind::Freshness)]
    }

    fn rows(metrics: &[Metric]) -> Vec<ReportRow> {
        vec![
            ReportRow::new(
                Artifact::new("org.a", "lib1", "1.0", "compile").unwrap(),
                None,
                [("cve_aggregated", Some("3".to_string())), ("freshness", Some("5".to_string()))].into_iter().collect(),
            ),
            ReportRow::new(
                Artifact::new("org.b", "lib2", "2.0", "test").unwrap(),
                None,
                MetricResult::unresolved(metrics),
            ),
        ]
    }

    #[test]
    fn test_plain_table() {
        let metrics = metrics();
        let rows = rows(&metrics);
        let mut output = String::new();
        generate(&Report::new("Simple Report for demo 1.0", &metrics, &rows), false, &mut output).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Simple Report for demo 1.0");
        assert!(lines[2].starts_with("Artifact    Version  Scope    Aggregated CVE  Freshness (missed releases)"));
        assert!(lines[4].starts_with("org.a:lib1  1.0      compile  3"));
        assert!(lines[5].starts_with("org.b:lib2  2.0      test     ?"));
        assert!(lines[5].ends_with('?'));
        assert!(!output.contains('\u{1b}'), "no ANSI escapes without colors");
    }

    #[test]
    fn test_colored_placeholder() {
        let metrics = metrics();
        let rows = rows(&metrics);
        let mut output = String::new();
        generate(&Report::new("t", &metrics, &rows), true, &mut output).unwrap();
        assert!(output.contains('\u{1b}'));
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let metrics = metrics();
        let mut output = String::new();
        generate(&Report::new("t", &metrics, &[]), false, &mut output).unwrap();
        assert_eq!(output.lines().count(), 4);
    }
}
