//! This module defines the capabilities the ingest pipelines require from the outside world

use tokio_util::sync::CancellationToken;

use crate::domain::models::{
    FetchError, Notification, ObjectRef, RecordError, SendError, WriteError,
};

/// Reads whole objects out of storage
#[cfg_attr(test, mockall::automock)]
pub trait ObjectReader: Send + Sync + 'static {
    /// fetch the full content of the referenced object
    fn get_object(
        &self,
        object: ObjectRef,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// Writes objects into storage, replacing whatever is already stored at the key
#[cfg_attr(test, mockall::automock)]
pub trait ObjectWriter: Send + Sync + 'static {
    fn put_object(
        &self,
        object: ObjectRef,
        content: Vec<u8>,
    ) -> impl Future<Output = Result<(), WriteError>> + Send;
}

/// Publishes a single string payload to a preconfigured queue
#[cfg_attr(test, mockall::automock)]
pub trait QueueSender: Send + Sync + 'static {
    /// returns the id the queue assigned to the message
    fn send_message(&self, body: String) -> impl Future<Output = Result<String, SendError>> + Send;
}

/// Fire and forget counters
#[cfg_attr(test, mockall::automock(type Err = std::convert::Infallible;))]
pub trait MetricSink: Send + Sync + 'static {
    type Err: std::fmt::Debug + Send;

    fn increment(
        &self,
        metric: &'static str,
        value: u64,
    ) -> impl Future<Output = Result<(), Self::Err>> + Send;
}

/// One pipeline applied to a single notification.
/// Implementations must check `cancel` at every I/O boundary and report
/// [RecordError::Cancelled] once it fires.
pub trait RecordProcessor: Send + Sync + 'static {
    fn process(
        &self,
        notification: &Notification,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), RecordError>> + Send;
}
