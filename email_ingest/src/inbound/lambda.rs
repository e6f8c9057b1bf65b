//! Glue between the Lambda runtime and the [Dispatcher]

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use aws_lambda_events::event::s3::{S3Event, S3EventRecord};
use lambda_runtime::{Context, Error, LambdaEvent};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::domain::models::{Notification, ObjectRef};
use crate::domain::ports::{MetricSink, RecordProcessor};
use crate::domain::service::Dispatcher;


/// Left between cancelling the records and the invocation deadline, for them to wind down
/// and for the aggregated error to reach the runtime
pub const DEADLINE_MARGIN: Duration = Duration::from_millis(500);

/// Converts every record of the event, keeping the batch order
pub fn notifications(event: &S3Event) -> Vec<Notification> {
    event.records.iter().map(notification_from_record).collect()
}

/// Missing bucket or key names are left empty and rejected when the record is processed
pub fn notification_from_record(record: &S3EventRecord) -> Notification {
    let bucket = record.s3.bucket.name.clone().unwrap_or_default();
    let key = record
        .s3
        .object
        .key
        .as_deref()
        .map(decode_key)
        .unwrap_or_default();

    Notification::new(ObjectRef::new(bucket, key), record.event_name.clone())
}

/// Object keys in S3 notifications are form encoded, spaces arrive as `+`
fn decode_key(key: &str) -> String {
    let spaced = key.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::warn!(error=?e, key=%key, "unable to decode key");
            key.to_string()
        }
    }
}

/// Processes one S3 event and reports an error if any record failed.
///
/// The records are cancelled [DEADLINE_MARGIN] ahead of the invocation deadline, so they can
/// report their cancellation before Lambda freezes the execution environment.
#[tracing::instrument(skip_all, fields(request_id = %event.context.request_id))]
pub async fn run_invocation<P, M>(
    dispatcher: &Dispatcher,
    processor: Arc<P>,
    metrics: Arc<M>,
    event: LambdaEvent<S3Event>,
) -> Result<(), Error>
where
    P: RecordProcessor,
    M: MetricSink,
{
    tracing::trace!(record_count = event.payload.records.len(), "processing s3 event");

    let cancel = CancellationToken::new();
    let deadline_guard = arm_deadline(&cancel, &event.context);

    let outcome = dispatcher
        .dispatch(processor, metrics, notifications(&event.payload), cancel)
        .await;

    if let Some(guard) = deadline_guard {
        guard.abort();
    }

    Ok(outcome.into_result()?)
}

/// A context without a deadline (as in local invocations) never cancels
fn arm_deadline(cancel: &CancellationToken, context: &Context) -> Option<JoinHandle<()>> {
    if context.deadline == 0 {
        return None;
    }

    let remaining = time_until_cancel(context.deadline(), SystemTime::now());
    let cancel = cancel.clone();

    Some(tokio::spawn(async move {
        tokio::time::sleep(remaining).await;
        tracing::warn!("invocation deadline is close, cancelling in-flight records");
        cancel.cancel();
    }))
}

/// Zero once the deadline is closer than [DEADLINE_MARGIN]
fn time_until_cancel(deadline: SystemTime, now: SystemTime) -> Duration {
    deadline
        .duration_since(now)
        .unwrap_or_default()
        .saturating_sub(DEADLINE_MARGIN)
}
