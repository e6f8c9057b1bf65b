use tokio_util::sync::CancellationToken;

use super::{require_object, until_cancelled};
use crate::domain::message::ParsedMessage;
use crate::domain::models::{Notification, RecordError};
use crate::domain::ports::{ObjectReader, QueueSender, RecordProcessor};
use crate::domain::url::UrlPolicy;

/// Sends the download url announced by a digest email to the download queue
pub struct EnqueueUrlService<R, Q> {
    reader: R,
    queue: Q,
    policy: UrlPolicy,
}

impl<R, Q> EnqueueUrlService<R, Q>
where
    R: ObjectReader,
    Q: QueueSender,
{
    pub fn new(reader: R, queue: Q, policy: UrlPolicy) -> Self {
        Self {
            reader,
            queue,
            policy,
        }
    }
}

impl<R, Q> RecordProcessor for EnqueueUrlService<R, Q>
where
    R: ObjectReader,
    Q: QueueSender,
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
        let url = self.policy.extract(&message)?;

        let message_id =
            until_cancelled(cancel, self.queue.send_message(url.as_str().to_string())).await?;

        tracing::info!(message_id=%message_id, url=%url, "sent download url to queue");
        Ok(())
    }
}
