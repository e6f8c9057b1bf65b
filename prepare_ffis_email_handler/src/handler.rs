use aws_lambda_events::event::s3::S3Event;
use email_ingest::inbound::lambda::run_invocation;
use lambda_runtime::{Error, LambdaEvent};

use crate::context::Context;

/// Handles S3 notifications for FFIS digest emails delivered to the SES bucket.
/// Returns an error describing every record that failed, or `Ok` when all emails were moved.
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
