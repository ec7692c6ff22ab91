//! Metric retrieval and row assembly for dependency artifacts
//!
//! This module turns a list of direct dependencies into render-ready report rows.
//! It talks to the remote metrics service, derives an overview link for each
//! artifact, and combines the two.
//!
//! # Implementation Model
//!
//! - [`Artifact`]: the identity of a dependency (group, artifact, version, scope)
//! - [`Metric`]: a requested metric name, tied to a [`MetricKind`] extractor when one exists
//! - [`MetricsClient`]: one `POST /release` per artifact, answering with a [`ProviderResult`]
//! - [`LinkResolver`]: pure derivation of the artifact's overview page URL
//! - [`ReportAssembler`]: runs the two above for every artifact and yields [`ReportRow`]s
//!
//! Nothing in here is fatal for a report run. An unknown release or a failed
//! request leaves that artifact's metrics unresolved; a bad coordinate only
//! drops its link. The row itself is always produced, and rows keep the order
//! of the input artifacts.

mod artifact;
mod assembler;
mod link_resolver;
mod metric;
mod metric_result;
mod metrics_client;
mod progress;
mod provider_result;
mod report_row;

pub use artifact::{Artifact, DEFAULT_SCOPE};
pub use assembler::{DEFAULT_MAX_CONCURRENT_REQUESTS, ReportAssembler};
pub use link_resolver::{DEFAULT_LINK_BASE_URL, LinkResolver};
pub use metric::{Metric, MetricKind};
pub use metric_result::MetricResult;
pub use metrics_client::{DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT, MetricsClient};
pub use progress::{NoProgress, Progress};
pub use provider_result::ProviderResult;
pub use report_row::ReportRow;
