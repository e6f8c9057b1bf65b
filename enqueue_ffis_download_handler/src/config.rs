use anyhow::Context;

use email_ingest::domain::service::DEFAULT_MAX_CONCURRENCY;
use email_ingest::domain::url::UrlPolicy;

/// The configuration parameters for the handler, pulled from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Compiled from DOWNLOAD_TARGET_URL_PATTERN
    pub url_policy: UrlPolicy,

    /// The queue download urls are sent to
    pub download_queue_url: String,

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
        let pattern = var("DOWNLOAD_TARGET_URL_PATTERN")
            .context("DOWNLOAD_TARGET_URL_PATTERN must be provided")?;
        let url_policy = UrlPolicy::from_pattern(&pattern)
            .context("DOWNLOAD_TARGET_URL_PATTERN must be a valid regular expression")?;
        let download_queue_url =
            var("FFIS_DOWNLOAD_QUEUE_URL").context("FFIS_DOWNLOAD_QUEUE_URL must be provided")?;
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
            url_policy,
            download_queue_url,
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
    fn it_should_compile_the_url_pattern() {
        let config = Config::from_vars(lookup(&[
            (
                "DOWNLOAD_TARGET_URL_PATTERN",
                r"https://mcusercontent.com/.+\.xlsx",
            ),
            ("FFIS_DOWNLOAD_QUEUE_URL", "https://sqs.local/ffis_downloads"),
        ]))
        .unwrap();

        assert!(
            config
                .url_policy
                .pattern()
                .is_match("https://mcusercontent.com/123/files/abc/digest.xlsx")
        );
        assert_eq!(config.download_queue_url, "https://sqs.local/ffis_downloads");
        assert_eq!(config.max_concurrent_records, DEFAULT_MAX_CONCURRENCY);
        assert!(!config.s3_use_path_style);
    }

    #[test]
    fn it_should_reject_an_invalid_pattern() {
        let err = Config::from_vars(lookup(&[
            ("DOWNLOAD_TARGET_URL_PATTERN", "https://(unclosed"),
            ("FFIS_DOWNLOAD_QUEUE_URL", "https://sqs.local/ffis_downloads"),
        ]))
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "DOWNLOAD_TARGET_URL_PATTERN must be a valid regular expression"
        );
    }

    #[test]
    fn it_should_require_the_queue_url() {
        let err = Config::from_vars(lookup(&[(
            "DOWNLOAD_TARGET_URL_PATTERN",
            r"https://mcusercontent.com/.+\.xlsx",
        )]))
        .unwrap_err();

        assert_eq!(err.to_string(), "FFIS_DOWNLOAD_QUEUE_URL must be provided");
    }
}
