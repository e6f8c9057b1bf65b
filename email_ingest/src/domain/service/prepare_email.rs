use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{MOVED_METRIC, emit_metric, require_object, until_cancelled};
use crate::domain::message::ParsedMessage;
use crate::domain::models::{Notification, ObjectRef, RecordError};
use crate::domain::ports::{MetricSink, ObjectReader, ObjectWriter, RecordProcessor};
use crate::domain::sender_date::SenderDatePolicy;

/// Copies digest emails from the SES bucket into the grants source data bucket,
/// filed under the date the email was sent.
pub struct PrepareEmailService<R, W, M> {
    reader: R,
    writer: W,
    metrics: Arc<M>,
    policy: SenderDatePolicy,
    /// the grants source data bucket
    destination_bucket: String,
}

impl<R, W, M> PrepareEmailService<R, W, M>
where
    R: ObjectReader,
    W: ObjectWriter,
    M: MetricSink,
{
    pub fn new(
        reader: R,
        writer: W,
        metrics: Arc<M>,
        policy: SenderDatePolicy,
        destination_bucket: impl Into<String>,
    ) -> Self {
        Self {
            reader,
            writer,
            metrics,
            policy,
            destination_bucket: destination_bucket.into(),
        }
    }
}

impl<R, W, M> RecordProcessor for PrepareEmailService<R, W, M>
where
    R: ObjectReader,
    W: ObjectWriter,
    M: MetricSink,
{
    async fn process(
        &self,
        notification: &Notification,
        cancel: &CancellationToken,
    ) -> Result<(), RecordError> {
        require_object(notification)?;

        let raw =
            until_cancelled(cancel, self.reader.get_object(notification.object.clone())).await?;

        let message = ParsedMessage::parse(&raw)?;
        let key = self.policy.extract(&message)?;

        // the original bytes are stored, not a re-serialized message
        let destination = ObjectRef::new(&self.destination_bucket, key.as_str());
        until_cancelled(cancel, self.writer.put_object(destination.clone(), raw)).await?;

        tracing::info!(destination=%destination, "successfully moved email");
        emit_metric(self.metrics.as_ref(), MOVED_METRIC, cancel).await;
        Ok(())
    }
}
