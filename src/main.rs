use std::sync::Arc;

use anyhow::Context;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use rsitems::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    lambda_runtime::tracing::init_default_subscriber();

    let config = Config::from_env().context("Could not load dispatcher configuration")?;
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoStore::new(aws_sdk_dynamodb::Client::new(&sdk_config), config.table_name);
    let dispatcher = Dispatcher::new(Arc::new(store));

    lambda_runtime::run(service_fn(|event| handler(&dispatcher, event))).await
}

async fn handler(
    dispatcher: &Dispatcher,
    event: LambdaEvent<ApiRequest>,
) -> Result<ApiResponse, Error> {
    Ok(dispatcher.dispatch(event.payload).await)
}
