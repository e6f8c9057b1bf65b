use aws_lambda_events::event::s3::S3Event;
use email_ingest::inbound::lambda::run_invocation;
use lambda_runtime::{Error, LambdaEvent};

use crate::context::Context;

/// Handles S3 notifications for prepared FFIS digest emails.
/// Sends the one spreadsheet url of each email to the download queue.
#[tracing::instrument(skip(ctx, event))]
pub async fn handler(ctx: Context, event: LambdaEvent<S3Event>) -> Result<(), Error> {
    run_invocation(
        &ctx.dispatcher,
        ctx.service.clone(),
        ctx.metrics.clone(),
        event,
    )
    .await
}
