use std::sync::Arc;

use email_ingest::domain::sender_date::SenderDatePolicy;
use email_ingest::domain::service::{Dispatcher, PrepareEmailService};
use email_ingest::outbound::{S3Storage, TracingMetrics};

use crate::config::Config;

pub type Service = PrepareEmailService<S3Storage, S3Storage, TracingMetrics>;

/// Everything an invocation needs, built once per execution environment
#[derive(Clone)]
pub struct Context {
    pub dispatcher: Dispatcher,
    pub service: Arc<Service>,
    pub metrics: Arc<TracingMetrics>,
}

impl Context {
    pub fn new(config: &Config, s3_client: s3_client::S3) -> Self {
        let storage = S3Storage::new(s3_client);
        let metrics = Arc::new(TracingMetrics::new("grants_ingest.prepare_ffis_email"));
        let service = PrepareEmailService::new(
            storage.clone(),
            storage,
            metrics.clone(),
            SenderDatePolicy::new(&config.ffis_digest_email_address),
            &config.source_data_bucket,
        );

        Self {
            dispatcher: Dispatcher::new(config.max_concurrent_records),
            service: Arc::new(service),
            metrics,
        }
    }
}
