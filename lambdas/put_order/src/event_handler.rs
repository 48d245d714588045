use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::Serialize;
use shared::{
    core::{ObjectStore, OrderRecord, OrderRepository},
    error::OrderError,
};

const SUCCESS_MESSAGE: &str = "Processamento concluído com sucesso.";

pub(crate) struct HandlerDeps<S: ObjectStore, R: OrderRepository> {
    pub object_store: S,
    pub order_repo: R,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IngestResponse {
    pub status_code: u16,
    pub body: String,
}

impl IngestResponse {
    fn success() -> Result<Self, Error> {
        Ok(Self {
            status_code: 200,
            body: serde_json::to_string(SUCCESS_MESSAGE)?,
        })
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

/// Only the first record is read. The key is used exactly as delivered.
pub(crate) fn object_location(event: &S3Event) -> Result<ObjectLocation, OrderError> {
    let record = event.records.first().ok_or(OrderError::NoRecords)?;
    let bucket = record
        .s3
        .bucket
        .name
        .clone()
        .ok_or(OrderError::MissingField("s3.bucket.name"))?;
    let key = record
        .s3
        .object
        .key
        .clone()
        .ok_or(OrderError::MissingField("s3.object.key"))?;
    Ok(ObjectLocation { bucket, key })
}

#[tracing::instrument(skip(deps, event))]
pub(crate) async fn function_handler<S: ObjectStore, R: OrderRepository>(
    deps: &HandlerDeps<S, R>,
    event: LambdaEvent<S3Event>,
) -> Result<IngestResponse, Error> {
    let location = object_location(&event.payload)?;
    tracing::info!(
        bucket = %location.bucket,
        key = %location.key,
        "Received object created notification"
    );
    let ignored = event.payload.records.len() - 1;
    if ignored > 0 {
        tracing::warn!("Ignoring {} additional records in notification", ignored);
    }

    let content = deps
        .object_store
        .get_object(&location.bucket, &location.key)
        .await?;
    let order = OrderRecord::from_slice(&content)?;
    tracing::info!("Order received:\n{}", order.to_log_json()?);

    deps.order_repo.put_order(order).await?;
    tracing::info!("Order stored");

    IngestResponse::success()
}
