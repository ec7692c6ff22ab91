use crate::facts::{Metric, ReportRow};

/// Everything a report generator needs: a title, the metric columns and the rows.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub title: &'a str,
    pub metrics: &'a [Metric],
    pub rows: &'a [ReportRow],
}

impl<'a> Report<'a> {
    #[must_use]
    pub const fn new(title: &'a str, metrics: &'a [Metric], rows: &'a [ReportRow]) -> Self {
        Self { title, metrics, rows }
    }

    /// Header cells: the fixed identity columns followed by one column per metric.
    pub fn columns(&self) -> impl Iterator<Item = &'a str> {
        super::common::FIXED_COLUMNS.into_iter().chain(self.metrics.iter().map(Metric::title))
    }
}
