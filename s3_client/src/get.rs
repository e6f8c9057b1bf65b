use aws_sdk_s3 as s3;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;

use crate::error::GetObjectErr;

const FORBIDDEN: u16 = 403;
const NOT_FOUND: u16 = 404;

/// Gets a given item from the bucket
#[tracing::instrument(skip(client))]
pub async fn get(client: &s3::Client, bucket: &str, key: &str) -> Result<Vec<u8>, GetObjectErr> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|err| classify(err, bucket, key))?;

    let body = resp
        .body
        .collect()
        .await
        .map_err(|err| GetObjectErr::Transient {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source: anyhow::Error::new(err).context("could not collect body"),
        })?;
    Ok(body.into_bytes().to_vec())
}

/// Sorts an sdk failure into not found, access denied, or something worth retrying
fn classify(err: SdkError<GetObjectError>, bucket: &str, key: &str) -> GetObjectErr {
    let bucket = bucket.to_string();
    let key = key.to_string();

    if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
        return GetObjectErr::NotFound { bucket, key };
    }

    match err.raw_response().map(|raw| raw.status().as_u16()) {
        Some(NOT_FOUND) => GetObjectErr::NotFound { bucket, key },
        Some(FORBIDDEN) => GetObjectErr::AccessDenied { bucket, key },
        _ => GetObjectErr::Transient {
            bucket,
            key,
            source: anyhow::Error::new(err),
        },
    }
}
