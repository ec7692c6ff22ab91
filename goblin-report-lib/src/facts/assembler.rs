use super::progress::Progress;
use super::{Artifact, LinkResolver, Metric, MetricResult, MetricsClient, ReportRow};
use core::sync::atomic::{AtomicU64, Ordering};
use futures_util::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;

const LOG_TARGET: &str = " assembler";

/// How many metric requests may be in flight at once by default.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 4;

/// Builds one report row per artifact from the metrics service and the link resolver.
pub struct ReportAssembler {
    metrics_client: MetricsClient,
    link_resolver: LinkResolver,
    permits: Semaphore,
    progress: Arc<dyn Progress>,
}

impl core::fmt::Debug for ReportAssembler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReportAssembler")
            .field("metrics_client", &self.metrics_client)
            .field("link_resolver", &self.link_resolver)
            .field("permits", &self.permits)
            .field("progress", &"<dyn Progress>")
            .finish()
    }
}

impl ReportAssembler {
    /// `max_concurrent_requests` of 1 queries the artifacts strictly one after another.
    pub fn new(
        metrics_client: MetricsClient,
        link_resolver: LinkResolver,
        max_concurrent_requests: usize,
        progress: impl Progress + 'static,
    ) -> Self {
        Self {
            metrics_client,
            link_resolver,
            permits: Semaphore::new(max_concurrent_requests.max(1)),
            progress: Arc::new(progress),
        }
    }

    /// Produce exactly one row per input artifact, in input order.
    ///
    /// Artifacts whose metrics could not be fetched still get a row, with every
    /// requested metric unresolved.
    pub async fn assemble(&self, artifacts: &[Artifact], metrics: &[Metric]) -> Vec<ReportRow> {
        if artifacts.is_empty() {
            self.progress.done();
            return Vec::new();
        }

        self.progress.set_phase("Querying");

        let total = artifacts.len() as u64;
        let completed = Arc::new(AtomicU64::new(0));
        {
            let completed = Arc::clone(&completed);
            self.progress.set_determinate(Box::new(move || {
                let current = completed.load(Ordering::Relaxed);
                (total, current, format!("{current}/{total} artifacts"))
            }));
        }

        // join_all yields results in the order of its inputs, whatever order the requests finish in
        let rows = join_all(artifacts.iter().map(|artifact| {
            let completed = Arc::clone(&completed);
            async move {
                let row = self.assemble_row(artifact, metrics).await;
                let _ = completed.fetch_add(1, Ordering::Relaxed);
                row
            }
        }))
        .await;

        self.progress.done();

        let with_metrics = rows.iter().filter(|row| row.metrics.resolved_count() > 0).count();
        log::info!(
            target: LOG_TARGET,
            "Assembled {} row(s): {with_metrics} with metric data, {} without",
            rows.len(),
            rows.len() - with_metrics
        );

        rows
    }

    async fn assemble_row(&self, artifact: &Artifact, metrics: &[Metric]) -> ReportRow {
        let link = self.link_resolver.resolve(artifact);

        let result = {
            let _permit = self.permits.acquire().await.expect("semaphore is never closed");
            self.metrics_client.fetch(artifact, metrics).await
        };

        let metric_result = result.found().unwrap_or_else(|| MetricResult::unresolved(metrics));
        ReportRow::new(artifact.clone(), link, metric_result)
    }
}
