use chrono::{DateTime, NaiveDate};
use mailparse::MailAddr;

use crate::domain::message::{Headers, ParsedMessage};
use crate::domain::models::{AddressParseError, DateParseError, DestinationKey, RecordError};


/// Accepts digest emails from the configured sender and files them by sent date
#[derive(Debug, Clone)]
pub struct SenderDatePolicy {
    /// matched anywhere in the sender address
    allowed_sender: String,
}

impl SenderDatePolicy {
    pub fn new(allowed_sender: impl Into<String>) -> Self {
        Self {
            allowed_sender: allowed_sender.into(),
        }
    }

    /// Derives the destination key for a message sent by the allowed sender
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn extract(&self, message: &ParsedMessage) -> Result<DestinationKey, RecordError> {
        let address = sender_address(message.headers())?;
        let date = sent_date(message.headers())?;
        tracing::debug!(from=%address, date=%date, "extracted sender and date");

        if !address.contains(&self.allowed_sender) {
            return Err(RecordError::Validation { address });
        }

        Ok(DestinationKey::for_date(date))
    }
}

/// Parses the `From` header, which must hold exactly one mailbox
pub fn sender_address(headers: &Headers) -> Result<String, AddressParseError> {
    let raw = headers
        .get("From")
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(AddressParseError::Missing)?;

    let list =
        mailparse::addrparse(raw).map_err(|_| AddressParseError::Malformed(raw.to_string()))?;

    let mut addresses: Vec<&str> = Vec::new();
    for addr in list.iter() {
        match addr {
            MailAddr::Single(info) => addresses.push(&info.addr),
            MailAddr::Group(group) => {
                addresses.extend(group.addrs.iter().map(|info| info.addr.as_str()))
            }
        }
    }

    match addresses.as_slice() {
        [address] if is_mailbox(address) => Ok(address.to_string()),
        [_] => Err(AddressParseError::Malformed(raw.to_string())),
        others => Err(AddressParseError::NotSingle {
            count: others.len(),
        }),
    }
}

fn is_mailbox(address: &str) -> bool {
    match address.rsplit_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !address.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Parses the `Date` header into the calendar date written in it.
///
/// The date is taken in the sender's own offset rather than converted to UTC.
/// Forms chrono does not accept fall back to [mailparse::dateparse], which only knows UTC.
pub fn sent_date(headers: &Headers) -> Result<NaiveDate, DateParseError> {
    let raw = headers
        .get("Date")
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(DateParseError::Missing)?;

    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Ok(date.date_naive());
    }

    mailparse::dateparse(raw)
        .ok()
        .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0))
        .map(|date| date.date_naive())
        .ok_or_else(|| DateParseError::Malformed(raw.to_string()))
}
