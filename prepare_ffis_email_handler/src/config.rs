use anyhow::Context;

use email_ingest::domain::service::DEFAULT_MAX_CONCURRENCY;

/// The configuration parameters for the handler, pulled from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The bucket prepared emails are copied into
    pub source_data_bucket: String,

    /// Matched anywhere in the sender address of every accepted email
    pub ffis_digest_email_address: String,

    /// How many records of one invocation are processed at the same time
    pub max_concurrent_records: usize,

    /// Path style addressing, needed for local s3 compatible endpoints
    pub s3_use_path_style: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let source_data_bucket = var("GRANTS_SOURCE_DATA_BUCKET_NAME")
            .context("GRANTS_SOURCE_DATA_BUCKET_NAME must be provided")?;
        let ffis_digest_email_address = var("FFIS_DIGEST_EMAIL_ADDRESS")
            .context("FFIS_DIGEST_EMAIL_ADDRESS must be provided")?;
        let max_concurrent_records = var("MAX_CONCURRENT_RECORDS")
            .map(|v| v.parse())
            .transpose()
            .context("MAX_CONCURRENT_RECORDS must be a number")?
            .unwrap_or(DEFAULT_MAX_CONCURRENCY);
        let s3_use_path_style = var("S3_USE_PATH_STYLE")
            .map(|v| v.parse())
            .transpose()
            .context("S3_USE_PATH_STYLE must be true or false")?
            .unwrap_or(false);

        Ok(Config {
            source_data_bucket,
            ffis_digest_email_address,
            max_concurrent_records,
            s3_use_path_style,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn it_should_read_every_variable() {
        let config = Config::from_vars(lookup(&[
            ("GRANTS_SOURCE_DATA_BUCKET_NAME", "test-source-data-bucket"),
            ("FFIS_DIGEST_EMAIL_ADDRESS", "fake@ffis.org"),
            ("MAX_CONCURRENT_RECORDS", "4"),
            ("S3_USE_PATH_STYLE", "true"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            Config {
                source_data_bucket: "test-source-data-bucket".to_string(),
                ffis_digest_email_address: "fake@ffis.org".to_string(),
                max_concurrent_records: 4,
                s3_use_path_style: true,
            }
        );
    }

    #[test]
    fn it_should_default_the_optional_variables() {
        let config = Config::from_vars(lookup(&[
            ("GRANTS_SOURCE_DATA_BUCKET_NAME", "test-source-data-bucket"),
            ("FFIS_DIGEST_EMAIL_ADDRESS", "fake@ffis.org"),
        ]))
        .unwrap();

        assert_eq!(config.max_concurrent_records, DEFAULT_MAX_CONCURRENCY);
        assert!(!config.s3_use_path_style);
    }

    #[test]
    fn it_should_name_the_missing_variable() {
        let err = Config::from_vars(lookup(&[("FFIS_DIGEST_EMAIL_ADDRESS", "fake@ffis.org")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "GRANTS_SOURCE_DATA_BUCKET_NAME must be provided"
        );

        let err = Config::from_vars(lookup(&[
            ("GRANTS_SOURCE_DATA_BUCKET_NAME", "test-source-data-bucket"),
            ("FFIS_DIGEST_EMAIL_ADDRESS", "fake@ffis.org"),
            ("MAX_CONCURRENT_RECORDS", "lots"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "MAX_CONCURRENT_RECORDS must be a number");
    }
}
