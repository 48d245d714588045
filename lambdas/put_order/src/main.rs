use lambda_runtime::{run, service_fn, tracing, Error};
mod event_handler;
use event_handler::function_handler;
use shared::adapters::{DynamoDbOrderRepository, S3ObjectStore};
use shared::configuration::Configuration;

use crate::event_handler::HandlerDeps;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let config = Configuration::load()?;

    let object_store = S3ObjectStore::new(aws_sdk_s3::Client::new(&aws_config));
    let order_repo =
        DynamoDbOrderRepository::new(&config, aws_sdk_dynamodb::Client::new(&aws_config));

    let handler_deps = HandlerDeps {
        object_store,
        order_repo,
    };

    run(service_fn(|event| function_handler(&handler_deps, event))).await
}
