use super::{Artifact, Metric, MetricResult};
use url::Url;

/// One artifact together with its overview link and metric values, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub artifact: Artifact,
    pub link: Option<Url>,
    pub metrics: MetricResult,
}

impl ReportRow {
    #[must_use]
    pub const fn new(artifact: Artifact, link: Option<Url>, metrics: MetricResult) -> Self {
        Self { artifact, link, metrics }
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        self.artifact.display_name()
    }

    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_ref().map(Url::as_str)
    }

    #[must_use]
    pub fn version(&self) -> &str {
        self.artifact.version()
    }

    #[must_use]
    pub fn scope(&self) -> &str {
        self.artifact.scope()
    }

    /// Metric values in the order of `metrics`, `None` where unresolved.
    pub fn values<'a>(&'a self, metrics: &'a [Metric]) -> impl Iterator<Item = Option<&'a str>> + 'a {
        metrics.iter().map(|metric| self.metrics.get(metric.name()))
    }
}
