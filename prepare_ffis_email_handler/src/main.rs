use anyhow::Context as _;
use aws_lambda_events::event::s3::S3Event;
use ingest_entrypoint::IngestEntrypoint;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};

use crate::{config::Config, context::Context, handler::handler};

mod config;
mod context;
mod handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    IngestEntrypoint::default().init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("all necessary env vars should be available")?;

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;
    let s3_client = s3_client::S3::from_config(&sdk_config, config.s3_use_path_style);

    let ctx = Context::new(&config, s3_client);

    tracing::trace!(
        source_data_bucket = %config.source_data_bucket,
        max_concurrent_records = config.max_concurrent_records,
        "initialized context"
    );

    let func = service_fn(move |event: LambdaEvent<S3Event>| {
        let ctx = ctx.clone();
        async move { handler(ctx, event).await }
    });

    run(func).await
}
