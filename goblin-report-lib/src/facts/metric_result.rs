use super::Metric;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Metric values obtained for one artifact, keyed by metric name.
///
/// A value of `None` means the metric was requested but could not be resolved.
/// Readers don't distinguish that from a metric that is missing altogether.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricResult {
    values: BTreeMap<Arc<str>, Option<String>>,
}

impl MetricResult {
    /// A result where every requested metric is unresolved.
    #[must_use]
    pub fn unresolved<'a>(metrics: impl IntoIterator<Item = &'a Metric>) -> Self {
        metrics.into_iter().map(|metric| (metric.name(), None)).collect()
    }

    /// The resolved value of a metric, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Option::as_deref)
    }

    /// Number of metrics holding a resolved value.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.values.values().filter(|value| value.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values.iter().map(|(name, value)| (name.as_ref(), value.as_deref()))
    }
}

impl<K: AsRef<str>> FromIterator<(K, Option<String>)> for MetricResult {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(name, value)| (Arc::from(name.as_ref()), value)).collect(),
        }
    }
}
