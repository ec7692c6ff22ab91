//! Client for the remote metrics service.
//!
//! Each artifact costs exactly one `POST {api_url}/release` call. There are no
//! retries and nothing is cached; a failed call only affects its own artifact.

use super::{Artifact, Metric, MetricResult, ProviderResult};
use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, app_err, bail};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

const LOG_TARGET: &str = "   metrics";

/// Where the metrics service listens unless configured otherwise.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Upper bound for a single request, connect through body.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const RELEASE_ROUTE: &str = "release";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseRequest<'a> {
    group_id: &'a str,
    artifact_id: &'a str,
    version: &'a str,
    added_values: Vec<&'a str>,
}

/// Fetches per-release metric values.
///
/// The underlying HTTP client lives as long as this value, which is created
/// once per report run and dropped with it.
#[derive(Debug, Clone)]
pub struct MetricsClient {
    client: reqwest::Client,
    release_url: Url,
}

impl MetricsClient {
    pub fn new(api_url: &Url, timeout: Duration) -> Result<Self> {
        if !matches!(api_url.scheme(), "http" | "https") {
            bail!("metrics service URL '{api_url}' must use http or https");
        }

        let mut release_url = api_url.clone();
        {
            let mut segments = release_url
                .path_segments_mut()
                .ok()
                .into_app_err_with(|| format!("metrics service URL '{api_url}' cannot be used as a base"))?;
            let _ = segments.pop_if_empty().push(RELEASE_ROUTE);
        }

        let client = reqwest::Client::builder()
            .user_agent("goblin-report")
            .timeout(timeout)
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self { client, release_url })
    }

    /// The endpoint requests are sent to.
    #[must_use]
    pub const fn release_url(&self) -> &Url {
        &self.release_url
    }

    /// Fetch the requested metrics for one artifact.
    ///
    /// Never fails as a whole: an unknown release or a transport problem is
    /// reported in the returned value and logged here.
    pub async fn fetch(&self, artifact: &Artifact, metrics: &[Metric]) -> ProviderResult<MetricResult> {
        match self.fetch_core(artifact, metrics).await {
            Ok(Some(result)) => {
                log::debug!(target: LOG_TARGET, "Fetched {} of {} metric(s) for '{artifact}'", result.resolved_count(), metrics.len());
                ProviderResult::Found(result)
            }
            Ok(None) => {
                log::warn!(target: LOG_TARGET, "Unknown release: {artifact}");
                ProviderResult::ReleaseNotFound
            }
            Err(e) => {
                log::error!(target: LOG_TARGET, "Could not retrieve metrics for '{artifact}': {e:#}");
                ProviderResult::Error(Arc::new(e))
            }
        }
    }

    /// `Ok(None)` means the service has no data for the release.
    async fn fetch_core(&self, artifact: &Artifact, metrics: &[Metric]) -> Result<Option<MetricResult>> {
        let request = ReleaseRequest {
            group_id: artifact.group_id(),
            artifact_id: artifact.artifact_id(),
            version: artifact.version(),
            added_values: metrics.iter().map(Metric::name).collect(),
        };

        let response = self
            .client
            .post(self.release_url.clone())
            .json(&request)
            .send()
            .await
            .into_app_err_with(|| format!("sending metrics request to '{}'", self.release_url))?;

        let status = response.status();
        if status != StatusCode::OK {
            log::debug!(target: LOG_TARGET, "Metrics service answered HTTP {status} for '{artifact}'");
            return Ok(None);
        }

        let body = response.text().await.into_app_err("reading metrics response body")?;
        let document: Value = serde_json::from_str(&body).into_app_err("parsing metrics response as JSON")?;

        if document.as_object().is_some_and(serde_json::Map::is_empty) {
            return Ok(None);
        }

        parse_release_document(artifact, &document, metrics).map(Some)
    }
}

/// Pull the requested metrics out of the first element of the `nodes` array.
///
/// A metric missing from the node is unresolved on its own and doesn't affect
/// the others. A metric that is present but malformed fails the whole document.
fn parse_release_document(artifact: &Artifact, document: &Value, metrics: &[Metric]) -> Result<MetricResult> {
    let node = document
        .get("nodes")
        .and_then(Value::as_array)
        .into_app_err("metrics response has no 'nodes' array")?
        .first()
        .into_app_err("metrics response has an empty 'nodes' array")?;

    metrics
        .iter()
        .map(|metric| -> Result<_> {
            let Some(field) = node.get(metric.name()) else {
                log::warn!(target: LOG_TARGET, "Unknown metric {metric} for release {artifact}");
                return Ok((metric.name(), None));
            };

            let value = metric
                .extract(field)
                .map_err(|e| app_err!("malformed value for metric '{metric}': {e}"))?;
            if value.is_none() {
                log::debug!(target: LOG_TARGET, "Metric '{metric}' for release {artifact} has no usable value: {field}");
            }

            Ok((metric.name(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::MetricKind;
    use serde_json::json;

    fn artifact() -> Artifact {
        Artifact::new("org.a", "lib1", "1.0", "compile").unwrap()
    }

    fn metrics() -> Vec<Metric> {
        vec![Metric::from(MetricKind::CveAggregated), Metric::from(MetricKind::Freshness)]
    }

    #[test]
    fn test_release_url_appends_route() {
        let client = MetricsClient::new(&Url::parse("http://localhost:8080").unwrap(), DEFAULT_REQUEST_TIMEOUT).unwrap();
        assert_eq!(client.release_url().as_str(), "http://localhost:8080/release");
    }

    #[test]
    fn test_release_url_keeps_base_path() {
        let client = MetricsClient::new(&Url::parse("http://metrics.internal/api/").unwrap(), DEFAULT_REQUEST_TIMEOUT).unwrap();
        assert_eq!(client.release_url().as_str(), "http://metrics.internal/api/release");
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let result = MetricsClient::new(&Url::parse("ftp://localhost/").unwrap(), DEFAULT_REQUEST_TIMEOUT);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_body_shape() {
        let artifact = artifact();
        let metrics = metrics();
        let request = ReleaseRequest {
            group_id: artifact.group_id(),
            artifact_id: artifact.artifact_id(),
            version: artifact.version(),
            added_values: metrics.iter().map(Metric::name).collect(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "groupId": "org.a",
                "artifactId": "lib1",
                "version": "1.0",
                "addedValues": ["cve_aggregated", "freshness"],
            })
        );
    }

    #[test]
    fn test_parse_all_metrics_present() {
        let document = json!({"nodes": [{"cve_aggregated": 3, "freshness": {"numberMissedRelease": "5"}}]});
        let result = parse_release_document(&artifact(), &document, &metrics()).unwrap();

        assert_eq!(result.get("cve_aggregated"), Some("3"));
        assert_eq!(result.get("freshness"), Some("5"));
    }

    #[test]
    fn test_parse_missing_metric_is_isolated() {
        let document = json!({"nodes": [{"cve_aggregated": 1}]});
        let result = parse_release_document(&artifact(), &document, &metrics()).unwrap();

        assert_eq!(result.get("cve_aggregated"), Some("1"));
        assert_eq!(result.get("freshness"), None);
        assert_eq!(result.iter().count(), 2);
    }

    #[test]
    fn test_parse_uses_first_node_only() {
        let document = json!({"nodes": [{"cve_aggregated": 1}, {"cve_aggregated": 9}]});
        let result = parse_release_document(&artifact(), &document, &metrics()).unwrap();
        assert_eq!(result.get("cve_aggregated"), Some("1"));
    }

    #[test]
    fn test_parse_unknown_metric_with_field_is_unresolved() {
        let document = json!({"nodes": [{"popularity": 99}]});
        let result = parse_release_document(&artifact(), &document, &[Metric::parse("popularity")]).unwrap();
        assert_eq!(result.get("popularity"), None);
    }

    #[test]
    fn test_parse_malformed_known_metric_fails_document() {
        let document = json!({"nodes": [{"cve_aggregated": 3, "freshness": {}}]});
        assert!(parse_release_document(&artifact(), &document, &metrics()).is_err());

        let document = json!({"nodes": [{"cve_aggregated": 3, "freshness": null}]});
        assert!(parse_release_document(&artifact(), &document, &metrics()).is_err());
    }

    #[test]
    fn test_parse_null_sub_field_is_unresolved() {
        let document = json!({"nodes": [{"cve_aggregated": 3, "freshness": {"numberMissedRelease": null}}]});
        let result = parse_release_document(&artifact(), &document, &metrics()).unwrap();
        assert_eq!(result.get("cve_aggregated"), Some("3"));
        assert_eq!(result.get("freshness"), None);
    }

    #[test]
    fn test_parse_without_nodes_fails() {
        assert!(parse_release_document(&artifact(), &json!({"data": []}), &metrics()).is_err());
        assert!(parse_release_document(&artifact(), &json!({"nodes": []}), &metrics()).is_err());
        assert!(parse_release_document(&artifact(), &json!({"nodes": {}}), &metrics()).is_err());
    }
}
