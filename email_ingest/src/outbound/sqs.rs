use sqs_client::SQS;

use crate::domain::models::SendError;
use crate::domain::ports::QueueSender;

/// [QueueSender] backed by the download queue of an [SQS] client
#[derive(Clone, Debug)]
pub struct SqsQueue {
    client: SQS,
}

impl SqsQueue {
    /// the client must have its download queue configured
    pub fn new(client: SQS) -> Self {
        Self { client }
    }
}

impl QueueSender for SqsQueue {
    async fn send_message(&self, body: String) -> Result<String, SendError> {
        self.client
            .enqueue_download(&body)
            .await
            .map_err(SendError)
    }
}
