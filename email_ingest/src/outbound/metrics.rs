use std::convert::Infallible;

use crate::domain::ports::MetricSink;

/// Emits counters as structured log events, which the log pipeline turns into metrics
#[derive(Clone, Debug, Default)]
pub struct TracingMetrics {
    /// prepended to every metric name, e.g. `grants_ingest.prepare_ffis_email`
    namespace: Option<String>,
}

impl TracingMetrics {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
        }
    }
}

impl MetricSink for TracingMetrics {
    type Err = Infallible;

    async fn increment(&self, metric: &'static str, value: u64) -> Result<(), Infallible> {
        match &self.namespace {
            Some(namespace) => {
                tracing::info!(metric = %format!("{namespace}.{metric}"), value, "count")
            }
            None => tracing::info!(metric, value, "count"),
        }
        Ok(())
    }
}
