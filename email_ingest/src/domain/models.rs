use chrono::{Datelike, NaiveDate};
use std::fmt::{self, Display};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// The digest source every prepared email is filed under
pub const SOURCE_NAME: &str = "ffis";

/// Identifies one object in S3
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// One storage notification out of the invocation batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub object: ObjectRef,
    /// e.g. `ObjectCreated:Put`
    pub event_name: Option<String>,
}

impl Notification {
    pub fn new(object: ObjectRef, event_name: Option<String>) -> Self {
        Self { object, event_name }
    }
}

/// Where a prepared email is written in the source data bucket.
///
/// The month and day are deliberately not zero padded, existing objects are stored under
/// keys like `sources/2023/4/24/ffis/raw.eml`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DestinationKey(String);

impl DestinationKey {
    pub fn for_date(date: NaiveDate) -> Self {
        Self(format!(
            "sources/{}/{}/{}/{SOURCE_NAME}/raw.eml",
            date.year(),
            date.month(),
            date.day()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DestinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The url of the file a digest email points at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetUrl(String);

impl TargetUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("object does not exist")]
    NotFound,
    #[error("access denied")]
    AccessDenied,
    #[error("transient failure: {0:#}")]
    Transient(anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing blank line between headers and body")]
    MissingSeparator,
    #[error("malformed header on line {line}")]
    MalformedHeader { line: usize },
    #[error("{0}")]
    Structure(#[from] mailparse::MailParseError),
}

#[derive(Debug, Error)]
pub enum AddressParseError {
    #[error("missing From header")]
    Missing,
    #[error("malformed address {0:?}")]
    Malformed(String),
    #[error("expected a single address, found {count}")]
    NotSingle { count: usize },
}

#[derive(Debug, Error)]
pub enum DateParseError {
    #[error("missing Date header")]
    Missing,
    #[error("malformed date {0:?}")]
    Malformed(String),
}

#[derive(Debug, Error)]
#[error("{0:#}")]
pub struct WriteError(pub anyhow::Error);

#[derive(Debug, Error)]
#[error("{0:#}")]
pub struct SendError(pub anyhow::Error);

/// Everything that can go wrong while processing a single record.
/// None of these abort the other records of the invocation.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("notification does not reference an object")]
    InvalidNotification,
    #[error("failed to fetch source object: {0}")]
    Fetch(#[from] FetchError),
    #[error("failed to parse email: {0}")]
    Parse(#[from] ParseError),
    #[error("failed to parse sender address: {0}")]
    AddressParse(#[from] AddressParseError),
    #[error("failed to parse sent date: {0}")]
    DateParse(#[from] DateParseError),
    #[error("origin address does not match expected sender")]
    Validation { address: String },
    #[error("email has no plaintext content")]
    NoPlaintextPart,
    #[error("no matching urls found in email")]
    NoMatchesFound,
    #[error("found {count} distinct matching urls in email, expected exactly one")]
    MultipleFound { count: usize },
    #[error("failed to write destination object: {0}")]
    Write(#[from] WriteError),
    #[error("failed to send message: {0}")]
    Send(#[from] SendError),
    #[error("invocation was cancelled")]
    Cancelled,
    #[error("record task did not complete: {0}")]
    TaskFailed(String),
}

impl RecordError {
    /// stable label used in logs and metric tags
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::InvalidNotification => "invalid_notification",
            RecordError::Fetch(FetchError::NotFound) => "fetch_not_found",
            RecordError::Fetch(FetchError::AccessDenied) => "fetch_access_denied",
            RecordError::Fetch(FetchError::Transient(_)) => "fetch_transient",
            RecordError::Parse(_) => "parse",
            RecordError::AddressParse(_) => "address_parse",
            RecordError::DateParse(_) => "date_parse",
            RecordError::Validation { .. } => "validation",
            RecordError::NoPlaintextPart => "no_plaintext_part",
            RecordError::NoMatchesFound => "no_matches_found",
            RecordError::MultipleFound { .. } => "multiple_found",
            RecordError::Write(_) => "write",
            RecordError::Send(_) => "send",
            RecordError::Cancelled => "cancelled",
            RecordError::TaskFailed(_) => "task_failed",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RecordError::Cancelled)
    }
}

/// A record which did not make it through its pipeline
#[derive(Debug)]
pub struct RecordFailure {
    /// position of the record in the invocation batch
    pub index: usize,
    pub notification: Notification,
    pub error: RecordError,
}

impl Display for RecordFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: [{}] {}",
            self.notification.object,
            self.error.kind(),
            self.error
        )
    }
}

/// The result of processing a single record, tagged with its batch position
pub type RecordResult = (usize, Notification, Result<(), RecordError>);

/// The aggregate of every record processed by one invocation
#[derive(Debug, Default)]
pub struct InvocationOutcome {
    total: usize,
    /// ordered by record index
    failures: Vec<RecordFailure>,
}

impl InvocationOutcome {
    /// Builds the outcome from one result per record, in any completion order
    pub fn from_results(results: impl IntoIterator<Item = RecordResult>) -> Self {
        let mut total = 0;
        let mut failures = Vec::new();
        for (index, notification, result) in results {
            total += 1;
            if let Err(error) = result {
                failures.push(RecordFailure {
                    index,
                    notification,
                    error,
                });
            }
        }
        failures.sort_by_key(|failure| failure.index);

        Self { total, failures }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn succeeded(&self) -> usize {
        self.total - self.failures.len()
    }

    pub fn failures(&self) -> &[RecordFailure] {
        &self.failures
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_result(self) -> Result<(), InvocationError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(InvocationError { outcome: self })
        }
    }
}

/// Returned when at least one record of the invocation failed
#[derive(Debug)]
pub struct InvocationError {
    outcome: InvocationOutcome,
}

impl InvocationError {
    pub fn outcome(&self) -> &InvocationOutcome {
        &self.outcome
    }

    pub fn failures(&self) -> &[RecordFailure] {
        self.outcome.failures()
    }
}

impl Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} records failed:",
            self.outcome.failed(),
            self.outcome.total()
        )?;
        for failure in self.outcome.failures() {
            write!(f, "\n\t* {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for InvocationError {}
