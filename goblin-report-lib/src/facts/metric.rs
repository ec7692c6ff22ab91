use core::fmt::{Display, Formatter, Result as FmtResult};
use serde_json::Value;
use std::sync::Arc;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// The metrics this tool knows how to turn into display values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MetricKind {
    /// Aggregated number of known vulnerabilities for the release.
    CveAggregated,

    /// How many releases the artifact is behind the latest one.
    Freshness,
}

impl MetricKind {
    /// The identifier used on the wire and in configuration.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::CveAggregated => "Aggregated CVE",
            Self::Freshness => "Freshness (missed releases)",
        }
    }

    /// Convert the raw JSON field for this metric into a display string.
    ///
    /// `Ok(None)` is an unresolved value. A field whose shape makes no sense for
    /// the metric is an error, which invalidates the whole release document.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the value is malformed
    pub fn extract(self, value: &Value) -> Result<Option<String>, String> {
        match self {
            Self::CveAggregated => Ok(match value {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }),
            Self::Freshness => value
                .get("numberMissedRelease")
                .map(scalar_text)
                .ok_or_else(|| format!("expected an object with 'numberMissedRelease', got {value}")),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// A requested metric: its wire name plus the extractor kind, if one is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Metric {
    name: Arc<str>,
    kind: Option<MetricKind>,
}

impl Metric {
    /// Resolve a metric name against the known kinds.
    #[must_use]
    pub fn parse(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        Self {
            name: Arc::from(name),
            kind: name.parse().ok(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> Option<MetricKind> {
        self.kind
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.kind.is_some()
    }

    /// Column title for reports; unknown metrics are titled by their name.
    #[must_use]
    pub fn title(&self) -> &str {
        match self.kind {
            Some(kind) => kind.title(),
            None => &self.name,
        }
    }

    /// Convert a raw JSON field; metrics without a registered extractor never resolve.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when a known metric's value is malformed
    pub fn extract(&self, value: &Value) -> Result<Option<String>, String> {
        self.kind.map_or(Ok(None), |kind| kind.extract(value))
    }
}

impl From<MetricKind> for Metric {
    fn from(kind: MetricKind) -> Self {
        Self {
            name: Arc::from(kind.name()),
            kind: Some(kind),
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name)
    }
}
