use thiserror::Error;

/// The ways reading an object can fail
#[derive(Debug, Error)]
pub enum GetObjectErr {
    #[error("object {key} does not exist in bucket {bucket}")]
    NotFound { bucket: String, key: String },
    #[error("access denied reading {key} from bucket {bucket}")]
    AccessDenied { bucket: String, key: String },
    #[error("could not get item {key} from bucket {bucket}")]
    Transient {
        bucket: String,
        key: String,
        #[source]
        source: anyhow::Error,
    },
}
