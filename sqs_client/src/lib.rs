mod download;

use aws_sdk_sqs as sqs;

#[derive(Clone, Debug)]
pub struct SQS {
    inner: sqs::Client,
    download_queue: Option<String>,
}

impl SQS {
    pub fn new(inner: sqs::Client) -> Self {
        Self {
            inner,
            download_queue: None,
        }
    }
}
