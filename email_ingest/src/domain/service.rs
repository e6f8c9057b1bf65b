use std::sync::Arc;

use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::domain::models::{InvocationOutcome, Notification, RecordError, RecordResult};
use crate::domain::ports::{MetricSink, RecordProcessor};

mod enqueue_url;
mod prepare_email;


pub use enqueue_url::EnqueueUrlService;
pub use prepare_email::PrepareEmailService;

/// emitted once per failed record
pub const FAILED_METRIC: &str = "email.failed";
/// emitted once per email copied into the source data bucket
pub const MOVED_METRIC: &str = "email.moved";

pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Fans the records of one invocation out to a [RecordProcessor] and aggregates every failure
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    /// upper bound of records processed at the same time
    max_concurrency: usize,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENCY)
    }
}

impl Dispatcher {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Processes every notification on its own task.
    ///
    /// A failing or panicking record never stops its siblings. The outcome holds one entry per
    /// failed record, ordered by position in the batch regardless of completion order.
    #[tracing::instrument(skip_all, fields(count_s3_events = notifications.len()))]
    pub async fn dispatch<P, M>(
        &self,
        processor: Arc<P>,
        metrics: Arc<M>,
        notifications: Vec<Notification>,
        cancel: CancellationToken,
    ) -> InvocationOutcome
    where
        P: RecordProcessor,
        M: MetricSink,
    {
        let results: Vec<RecordResult> = futures::stream::iter(notifications.into_iter().enumerate())
            .map(|(index, notification)| {
                let span = tracing::info_span!(
                    "handle.record",
                    index,
                    event_name = notification.event_name.as_deref().unwrap_or_default(),
                    source_bucket = %notification.object.bucket,
                    source_object_key = %notification.object.key,
                );

                let handle = {
                    let processor = processor.clone();
                    let cancel = cancel.clone();
                    let notification = notification.clone();
                    tokio::spawn(
                        async move { processor.process(&notification, &cancel).await }
                            .instrument(span.clone()),
                    )
                };

                let metrics = metrics.clone();
                async move {
                    let result = match handle.await {
                        Ok(result) => result,
                        Err(err) => Err(RecordError::TaskFailed(err.to_string())),
                    };

                    if let Err(err) = &result {
                        tracing::error!(error=%err, kind=err.kind(), "failed to process record");
                        // counted even when the failure is the cancellation itself
                        if let Err(metric_err) = metrics.increment(FAILED_METRIC, 1).await {
                            tracing::warn!(error=?metric_err, metric = FAILED_METRIC, "failed to emit metric");
                        }
                    }

                    (index, notification, result)
                }
                .instrument(span)
            })
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        let outcome = InvocationOutcome::from_results(results);
        if outcome.is_success() {
            tracing::info!(count_s3_events = outcome.total(), "processed every record");
        } else {
            tracing::warn!(
                count_errors = outcome.failed(),
                count_s3_events = outcome.total(),
                "failures occurred during invocation; check logs for details"
            );
        }

        outcome
    }
}

/// Runs `fut` unless the invocation is cancelled first
pub(crate) async fn until_cancelled<T, E>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T, E>>,
) -> Result<T, RecordError>
where
    RecordError: From<E>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(RecordError::Cancelled),
        res = fut => res.map_err(RecordError::from),
    }
}

/// Emits a counter without letting its failure leak into the record outcome.
/// Dropped once the invocation is cancelled.
pub(crate) async fn emit_metric<M: MetricSink>(
    metrics: &M,
    metric: &'static str,
    cancel: &CancellationToken,
) {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!(metric, "invocation cancelled, dropping metric");
        }
        res = metrics.increment(metric, 1) => {
            if let Err(err) = res {
                tracing::warn!(error=?err, metric, "failed to emit metric");
            }
        }
    }
}

/// Rejects notifications which do not name an object
pub(crate) fn require_object(notification: &Notification) -> Result<(), RecordError> {
    let object = &notification.object;
    if object.bucket.is_empty() || object.key.is_empty() {
        return Err(RecordError::InvalidNotification);
    }
    Ok(())
}
