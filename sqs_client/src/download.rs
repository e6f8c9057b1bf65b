use anyhow::Context;
use aws_sdk_sqs as sqs;

use crate::SQS;

impl SQS {
    pub fn download_queue(mut self, download_queue: &str) -> Self {
        self.download_queue = Some(download_queue.to_string());
        self
    }

    /// Sends the url of a file to download as the raw message body.
    /// Returns the id SQS assigned to the message.
    #[tracing::instrument(err, skip(self))]
    pub async fn enqueue_download(&self, url: &str) -> anyhow::Result<String> {
        let Some(download_queue) = &self.download_queue else {
            anyhow::bail!("download_queue is not configured");
        };

        send_message(&self.inner, download_queue, url).await
    }
}

#[tracing::instrument(skip(sqs_client))]
pub async fn send_message(
    sqs_client: &sqs::Client,
    queue_url: &str,
    body: &str,
) -> anyhow::Result<String> {
    let output = sqs_client
        .send_message()
        .queue_url(queue_url)
        .message_body(body)
        .send()
        .await
        .context(format!("could not send message to queue {queue_url}"))?;

    output
        .message_id
        .context("sqs did not return a message id")
}
