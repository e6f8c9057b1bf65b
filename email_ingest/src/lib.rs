//! Moves and validates email delivered into S3 by SES.
//!
//! Every handler invocation receives a batch of S3 notifications. Each record is fetched, parsed
//! as a mail message, reduced to one actionable fact, and forwarded:
//!
//! - [domain::service::PrepareEmailService] copies a digest email into the source data bucket
//!   under a key derived from its sent date.
//! - [domain::service::EnqueueUrlService] sends the single download url found in a digest email
//!   to a queue.
//!
//! [domain::service::Dispatcher] runs the records concurrently and aggregates every failure
//! into one [domain::models::InvocationOutcome].

pub mod domain;
pub mod inbound;
pub mod outbound;
