mod error;
mod get;
mod put;

pub use error::GetObjectErr;
pub use aws_sdk_s3::types::ServerSideEncryption;

#[derive(Clone, Debug)]
pub struct S3 {
    inner: aws_sdk_s3::Client,
}

impl S3 {
    pub fn new(inner: aws_sdk_s3::Client) -> Self {
        Self { inner }
    }

    /// Builds the client from a loaded sdk config.
    /// Path style addressing is needed for local s3 compatible endpoints.
    pub fn from_config(config: &aws_config::SdkConfig, use_path_style: bool) -> Self {
        let s3_config = aws_sdk_s3::config::Builder::from(config)
            .force_path_style(use_path_style)
            .build();
        Self::new(aws_sdk_s3::Client::from_conf(s3_config))
    }

    /// Retreives the provided key from the bucket.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, GetObjectErr> {
        get::get(&self.inner, bucket, key).await
    }

    /// Puts the provided content into the bucket at the provided key,
    /// encrypted at rest with the requested algorithm.
    #[tracing::instrument(skip(self, content))]
    pub async fn put(
        &self,
        bucket: &str,
        key: &str,
        content: Vec<u8>,
        encryption: ServerSideEncryption,
    ) -> anyhow::Result<()> {
        put::put(&self.inner, bucket, key, content, encryption).await
    }
}
