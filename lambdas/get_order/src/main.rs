use http_handler::function_handler;
use lambda_http::{run, service_fn, tracing, Error};
use shared::adapters::DynamoDbOrderRepository;
use shared::configuration::Configuration;

use crate::http_handler::HandlerDeps;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let config = Configuration::load()?;

    let order_repo =
        DynamoDbOrderRepository::new(&config, aws_sdk_dynamodb::Client::new(&aws_config));
    let deps = HandlerDeps { order_repo };

    run(service_fn(|event| function_handler(&deps, event))).await
}
