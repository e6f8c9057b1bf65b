//! Production implementations of the [crate::domain::ports]

mod metrics;
mod s3;
mod sqs;

pub use metrics::TracingMetrics;
pub use s3::S3Storage;
pub use sqs::SqsQueue;
