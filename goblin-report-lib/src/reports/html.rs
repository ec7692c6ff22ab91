use super::Report;
use super::common::display_value;
use crate::Result;
use chrono::{DateTime, Local};
use core::fmt::Write;

/// Write the report as a standalone HTML page.
///
/// Without a timestamp the output depends only on the report contents.
pub fn generate<W: Write>(report: &Report<'_>, timestamp: Option<DateTime<Local>>, writer: &mut W) -> Result<()> {
    let title = html_escape(report.title);

    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html>")?;
    writeln!(writer, "<head>")?;
    writeln!(writer, "  <meta charset=\"UTF-8\">")?;
    writeln!(writer, "  <title>{title}</title>")?;
    writeln!(writer, "</head>")?;
    writeln!(writer, "<body>")?;
    writeln!(writer, "  <h1>{title}</h1>")?;
    if let Some(timestamp) = timestamp {
        writeln!(writer, "  <p>Generated {}</p>", timestamp.format("%Y-%m-%d %H:%M"))?;
    }
    writeln!(writer, "  <section>")?;
    writeln!(writer, "    <h2>Direct dependencies</h2>")?;
    writeln!(writer, "    <table>")?;

    write!(writer, "      <tr>")?;
    for column in report.columns() {
        write!(writer, "<th>{}</th>", html_escape(column))?;
    }
    writeln!(writer, "</tr>")?;

    for row in report.rows {
        write!(writer, "      <tr>")?;

        let name = html_escape(&row.display_name());
        match row.link() {
            Some(link) => write!(writer, "<td><a href=\"{}\">{name}</a></td>", html_escape(link))?,
            None => write!(writer, "<td>{name}</td>")?,
        }

        write!(writer, "<td>{}</td>", html_escape(row.version()))?;
        write!(writer, "<td>{}</td>", html_escape(row.scope()))?;
        for value in row.values(report.metrics) {
            write!(writer, "<td>{}</td>", html_escape(display_value(value)))?;
        }

        writeln!(writer, "</tr>")?;
    }

    writeln!(writer, "    </table>")?;
    writeln!(writer, "  </section>")?;
    writeln!(writer, "</body>")?;
    writeln!(writer, "</html>")?;

    Ok(())
}

fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{Artifact, LinkResolver, Metric, MetricKind, MetricResult, ReportRow};
    use chrono::TimeZone;

    fn test_timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_html_escape_all_special_chars() {
        assert_eq!(html_escape("<>&\"'"), "&lt;&gt;&amp;&quot;&#39;");
        assert_eq!(html_escape("plain"), "plain");
    }

    fn sample_rows(metrics: &[Metric]) -> Vec<ReportRow> {
        let lib1 = Artifact::new("org.a", "lib1", "1.0", "compile").unwrap();
        vec![
            ReportRow::new(
                lib1.clone(),
                LinkResolver::default().resolve(&lib1),
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
    fn test_generate_links_and_placeholders() {
        let metrics = vec![Metric::from(MetricKind::CveAggregated), Metric::from(MetricKind::Freshness)];
        let rows = sample_rows(&metrics);

        let mut html = String::new();
        generate(&Report::new("Simple Report for <demo>", &metrics, &rows), None, &mut html).unwrap();

        assert!(html.contains("<title>Simple Report for &lt;demo&gt;</title>"));
        assert!(html.contains("<h2>Direct dependencies</h2>"));
        assert!(html.contains("<th>Freshness (missed releases)</th>"));
        assert!(html.contains("<td><a href=\"http://central.sonatype.com/artifact/org.a/lib1\">org.a:lib1</a></td>"));
        assert!(html.contains("<td>org.b:lib2</td><td>2.0</td><td>test</td><td>?</td><td>?</td>"));
        assert!(!html.contains("Generated"));
        assert!(html.find("org.a:lib1").unwrap() < html.find("org.b:lib2").unwrap());
    }

    #[test]
    fn test_generate_without_timestamp_is_reproducible() {
        let metrics = vec![Metric::from(MetricKind::CveAggregated), Metric::from(MetricKind::Freshness)];
        let rows = sample_rows(&metrics);
        let report = Report::new("Simple Report for demo", &metrics, &rows);

        let mut first = String::new();
        generate(&report, None, &mut first).unwrap();
        let mut second = String::new();
        generate(&report, None, &mut second).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_with_timestamp() {
        let metrics = vec![Metric::from(MetricKind::CveAggregated)];
        let rows = sample_rows(&metrics);

        let mut html = String::new();
        generate(&Report::new("Simple Report for demo", &metrics, &rows), Some(test_timestamp()), &mut html).unwrap();

        assert!(html.contains("<p>Generated 2024-01-15 10:30</p>"));
    }
}
