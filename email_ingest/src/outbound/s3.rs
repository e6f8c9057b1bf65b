use s3_client::{GetObjectErr, S3, ServerSideEncryption};

use crate::domain::models::{FetchError, ObjectRef, WriteError};
use crate::domain::ports::{ObjectReader, ObjectWriter};

/// every object written by the pipelines is encrypted at rest
const WRITE_ENCRYPTION: ServerSideEncryption = ServerSideEncryption::Aes256;

/// [ObjectReader] and [ObjectWriter] backed by S3
#[derive(Clone, Debug)]
pub struct S3Storage {
    client: S3,
}

impl S3Storage {
    pub fn new(client: S3) -> Self {
        Self { client }
    }
}

impl ObjectReader for S3Storage {
    async fn get_object(&self, object: ObjectRef) -> Result<Vec<u8>, FetchError> {
        self.client
            .get(&object.bucket, &object.key)
            .await
            .map_err(fetch_error)
    }
}

impl ObjectWriter for S3Storage {
    async fn put_object(&self, object: ObjectRef, content: Vec<u8>) -> Result<(), WriteError> {
        self.client
            .put(&object.bucket, &object.key, content, WRITE_ENCRYPTION)
            .await
            .map_err(WriteError)
    }
}

fn fetch_error(err: GetObjectErr) -> FetchError {
    match err {
        GetObjectErr::NotFound { .. } => FetchError::NotFound,
        GetObjectErr::AccessDenied { .. } => FetchError::AccessDenied,
        transient @ GetObjectErr::Transient { .. } => {
            FetchError::Transient(anyhow::Error::new(transient))
        }
    }
}

#[cfg(test)]
mod tests {
    use cool_asserts::assert_matches;

    use super::*;

    #[test]
    fn it_should_write_with_aes256() {
        assert_eq!(WRITE_ENCRYPTION.as_str(), "AES256");
    }

    #[test]
    fn it_should_map_get_failures() {
        let not_found = GetObjectErr::NotFound {
            bucket: "test-email-bucket".to_string(),
            key: "ses/ffis_ingest/new/gone.eml".to_string(),
        };
        assert_matches!(fetch_error(not_found), FetchError::NotFound);

        let denied = GetObjectErr::AccessDenied {
            bucket: "test-email-bucket".to_string(),
            key: "ses/ffis_ingest/new/secret.eml".to_string(),
        };
        assert_matches!(fetch_error(denied), FetchError::AccessDenied);

        let transient = GetObjectErr::Transient {
            bucket: "test-email-bucket".to_string(),
            key: "ses/ffis_ingest/new/slow.eml".to_string(),
            source: anyhow::anyhow!("dispatch failure"),
        };
        assert_matches!(fetch_error(transient), FetchError::Transient(_));
    }
}
