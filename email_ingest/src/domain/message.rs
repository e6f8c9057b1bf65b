//! Parsing of the raw bytes SES stores for every received email.
//!
//! [mailparse] is lenient and accepts nearly any byte sequence as a message, so the header
//! block is checked for well formed syntax before it is handed over.

use mailparse::ParsedMail;

use crate::domain::models::ParseError;

#[cfg(test)]
mod tests;

const PLAINTEXT: &str = "text/plain";

/// Ordered header list with case insensitive, first match lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    /// Returns the decoded value of the first header named `name`, ignoring case
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Headers {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A decoded leaf `text/*` part of the message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyPart {
    /// lowercased, e.g. `text/plain`
    pub mimetype: String,
    pub text: String,
}

/// A structured view of one email, read only once built
#[derive(Debug, Clone)]
pub struct ParsedMessage {
    headers: Headers,
    parts: Vec<BodyPart>,
}

impl ParsedMessage {
    #[tracing::instrument(skip(raw), fields(len = raw.len()), level = "debug")]
    pub fn parse(raw: &[u8]) -> Result<Self, ParseError> {
        check_header_block(raw)?;

        let mail = mailparse::parse_mail(raw)?;
        let headers = mail
            .headers
            .iter()
            .map(|header| (header.get_key(), header.get_value()))
            .collect();

        let mut parts = Vec::new();
        collect_text_parts(&mail, &mut parts)?;

        Ok(Self { headers, parts })
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The text parts of the body in document order
    pub fn parts(&self) -> &[BodyPart] {
        &self.parts
    }

    /// The first `text/plain` part of the body
    pub fn plaintext(&self) -> Option<&str> {
        self.parts
            .iter()
            .find(|part| part.mimetype == PLAINTEXT)
            .map(|part| part.text.as_str())
    }
}

/// Walks the mime tree depth first, keeping the decoded text leaves
fn collect_text_parts(mail: &ParsedMail<'_>, parts: &mut Vec<BodyPart>) -> Result<(), ParseError> {
    if !mail.subparts.is_empty() {
        for subpart in &mail.subparts {
            collect_text_parts(subpart, parts)?;
        }
        return Ok(());
    }

    let mimetype = mail.ctype.mimetype.to_ascii_lowercase();
    if mimetype.starts_with("text/") {
        parts.push(BodyPart {
            mimetype,
            text: mail.get_body()?,
        });
    }
    Ok(())
}

/// Ensures every header line is `name: value` or a continuation, and that a blank line
/// separates the headers from the body.
fn check_header_block(raw: &[u8]) -> Result<(), ParseError> {
    let mut seen_header = false;

    for (index, chunk) in raw.split_inclusive(|b| *b == b'\n').enumerate() {
        let line = chunk.strip_suffix(b"\n").unwrap_or(chunk);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let line_number = index + 1;

        if line.is_empty() {
            // a trailing fragment without a newline is not a separator
            if chunk.ends_with(b"\n") {
                return Ok(());
            }
            break;
        }

        if line[0] == b' ' || line[0] == b'\t' {
            if !seen_header {
                return Err(ParseError::MalformedHeader { line: line_number });
            }
            continue;
        }

        let Some(colon) = line.iter().position(|b| *b == b':') else {
            return Err(ParseError::MalformedHeader { line: line_number });
        };
        let name = &line[..colon];
        if name.is_empty() || !name.iter().all(|b| (33..=126).contains(b)) {
            return Err(ParseError::MalformedHeader { line: line_number });
        }
        seen_header = true;
    }

    Err(ParseError::MissingSeparator)
}
