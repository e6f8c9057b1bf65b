use regex::Regex;

use crate::domain::message::ParsedMessage;
use crate::domain::models::{RecordError, TargetUrl};

#[cfg(test)]
mod tests;

/// Finds the one download url a digest email points at
#[derive(Debug, Clone)]
pub struct UrlPolicy {
    pattern: Regex,
}

impl UrlPolicy {
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }

    /// Compiles the configured pattern
    pub fn from_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::new(Regex::new(pattern)?))
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Searches the plaintext body for exactly one distinct match.
    /// Two different matches are ambiguous and rejected rather than guessed between.
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn extract(&self, message: &ParsedMessage) -> Result<TargetUrl, RecordError> {
        let plaintext = message.plaintext().ok_or(RecordError::NoPlaintextPart)?;

        let mut matches: Vec<&str> = Vec::new();
        for found in self.pattern.find_iter(plaintext) {
            if !matches.contains(&found.as_str()) {
                matches.push(found.as_str());
            }
        }

        match matches.as_slice() {
            [] => Err(RecordError::NoMatchesFound),
            [url] => Ok(TargetUrl::new(*url)),
            many => {
                tracing::debug!(matches=?many, "found more than one url");
                Err(RecordError::MultipleFound { count: many.len() })
            }
        }
    }
}
