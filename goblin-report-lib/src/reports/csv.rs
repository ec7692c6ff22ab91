use super::Report;
use super::common::row_cells;
use crate::Result;
use core::fmt::Write;
use std::borrow::Cow;

pub fn generate<W: Write>(report: &Report<'_>, writer: &mut W) -> Result<()> {
    let header: Vec<Cow<'_, str>> = report.columns().chain(["Link"]).map(escape_csv).collect();
    writeln!(writer, "{}", header.join(","))?;

    for row in report.rows {
        let mut cells: Vec<String> = row_cells(row, report.metrics).map(|cell| escape_csv(&cell).into_owned()).collect();
        cells.push(escape_csv(row.link().unwrap_or_default()).into_owned());
        writeln!(writer, "{}", cells.join(","))?;
    }

    Ok(())
}

/// Escape a value for RFC compliant CSV output.
///
/// Wraps the value in double quotes if it contains commas, newlines, or double quotes.
/// Internal double quotes are doubled per the RFC.
fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else if s.contains(',') || s.contains('\n') || s.contains('\r') {
        Cow::Owned(format!("\"{s}\""))
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{Artifact, LinkResolver, Metric, MetricKind, MetricResult, ReportRow};

    #[test]
    fn test_escape_csv_no_special_chars() {
        let result = escape_csv("hello world");
        assert_eq!(result, "hello world");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_csv_with_quotes() {
        assert_eq!(escape_csv("hello \"world\""), "\"hello \"\"world\"\"\"");
    }

    #[test]
    fn test_escape_csv_with_comma_or_newline() {
        assert_eq!(escape_csv("hello,world"), "\"hello,world\"");
        assert_eq!(escape_csv("hello\nworld"), "\"hello\nworld\"");
    }

    #[test]
    fn test_generate_rows_with_placeholders_and_links() {
        let metrics = vec![Metric::from(MetricKind::CveAggregated), Metric::from(MetricKind::Freshness)];
        let lib1 = Artifact::new("org.a", "lib1", "1.0", "compile").unwrap();
        let lib2 = Artifact::new("org.b", "lib2", "2.0", "test").unwrap();
        let rows = vec![
            ReportRow::new(
                lib1.clone(),
                LinkResolver::default().resolve(&lib1),
                [("cve_aggregated", Some("3".to_string())), ("freshness", Some("5".to_string()))].into_iter().collect(),
            ),
            ReportRow::new(lib2, None, MetricResult::unresolved(&metrics)),
        ];

        let mut output = String::new();
        generate(&Report::new("t", &metrics, &rows), &mut output).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Artifact,Version,Scope,Aggregated CVE,Freshness (missed releases),Link");
        assert_eq!(lines[1], "org.a:lib1,1.0,compile,3,5,http://central.sonatype.com/artifact/org.a/lib1");
        assert_eq!(lines[2], "org.b:lib2,2.0,test,?,?,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_generate_empty() {
        let metrics = vec![Metric::from(MetricKind::CveAggregated)];
        let mut output = String::new();
        generate(&Report::new("t", &metrics, &[]), &mut output).unwrap();
        assert_eq!(output, "Artifact,Version,Scope,Aggregated CVE,Link\n");
    }
}
