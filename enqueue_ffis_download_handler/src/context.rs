use std::sync::Arc;

use email_ingest::domain::service::{Dispatcher, EnqueueUrlService};
use email_ingest::outbound::{S3Storage, SqsQueue, TracingMetrics};

use crate::config::Config;

pub type Service = EnqueueUrlService<S3Storage, SqsQueue>;

/// Everything an invocation needs, built once per execution environment
#[derive(Clone)]
pub struct Context {
    pub dispatcher: Dispatcher,
    pub service: Arc<Service>,
    pub metrics: Arc<TracingMetrics>,
}

impl Context {
    pub fn new(config: Config, s3_client: s3_client::S3, sqs_client: sqs_client::SQS) -> Self {
        let service = EnqueueUrlService::new(
            S3Storage::new(s3_client),
            SqsQueue::new(sqs_client.download_queue(&config.download_queue_url)),
            config.url_policy,
        );

        Self {
            dispatcher: Dispatcher::new(config.max_concurrent_records),
            service: Arc::new(service),
            metrics: Arc::new(TracingMetrics::new("grants_ingest.enqueue_ffis_download")),
        }
    }
}
