use crate::{
    configuration::Configuration,
    core::{ObjectStore, OrderPage, OrderRecord, OrderRepository},
    error::OrderError,
};
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_s3::error::ProvideErrorMetadata;
use lambda_http::tracing;

const LIST_PAGE_SIZE: i32 = 50;

#[derive(Debug)]
pub struct S3ObjectStore {
    s3_client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(s3_client: aws_sdk_s3::Client) -> Self {
        Self { s3_client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[tracing::instrument(skip(self))]
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, OrderError> {
        let response = self
            .s3_client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await;

        let output = match response {
            Ok(output) => output,
            Err(e) => {
                let message = format!("{:?}", e);
                let service_error = e.into_service_error();
                return Err(if service_error.is_no_such_key() {
                    OrderError::ObjectNotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else if service_error.code() == Some("AccessDenied") {
                    OrderError::ObjectAccessDenied {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    OrderError::ObjectFetch {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        message,
                    }
                });
            }
        };

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| OrderError::ObjectFetch {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: format!("could not collect body: {:?}", e),
            })?;
        Ok(body.into_bytes().to_vec())
    }
}

#[derive(Debug)]
pub struct DynamoDbOrderRepository {
    table_name: String,
    key_attribute: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl DynamoDbOrderRepository {
    pub fn new(configuration: &Configuration, dynamodb_client: aws_sdk_dynamodb::Client) -> Self {
        Self {
            table_name: configuration.dynamodb_table.clone(),
            key_attribute: configuration.order_key_attribute.clone(),
            dynamodb_client,
        }
    }

    fn read_error(&self, e: impl std::fmt::Debug) -> OrderError {
        OrderError::TableRead {
            table: self.table_name.clone(),
            message: format!("{:?}", e),
        }
    }
}

#[async_trait]
impl OrderRepository for DynamoDbOrderRepository {
    #[tracing::instrument(skip(self, order), fields(table = %self.table_name))]
    async fn put_order(&self, order: OrderRecord) -> Result<(), OrderError> {
        // no condition expression: the table's key schema decides which item is replaced
        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some((&order).into()))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| OrderError::TableWrite {
                table: self.table_name.clone(),
                message: format!("{:?}", e.into_service_error()),
            })
    }

    #[tracing::instrument(skip(self), fields(table = %self.table_name))]
    async fn get_order(&self, order_id: &str) -> Result<Option<OrderRecord>, OrderError> {
        let result = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name)
            .key(&self.key_attribute, AttributeValue::S(order_id.to_string()))
            .send()
            .await
            .map_err(|e| self.read_error(e.into_service_error()))?;

        result.item.map(OrderRecord::try_from).transpose()
    }

    #[tracing::instrument(skip(self), fields(table = %self.table_name))]
    async fn list_orders(
        &self,
        last_evaluated_id: Option<String>,
    ) -> Result<OrderPage, OrderError> {
        let mut scan = self
            .dynamodb_client
            .scan()
            .table_name(&self.table_name)
            .limit(LIST_PAGE_SIZE);
        if let Some(last_evaluated_id) = last_evaluated_id {
            scan = scan.exclusive_start_key(&self.key_attribute, AttributeValue::S(last_evaluated_id));
        }
        let result = scan
            .send()
            .await
            .map_err(|e| self.read_error(e.into_service_error()))?;

        let mut orders = vec![];
        for item in result.items.unwrap_or_default() {
            // skip items that cannot be expressed as JSON
            match OrderRecord::try_from(item) {
                Ok(order) => orders.push(order),
                Err(e) => tracing::warn!("Skipping item: {}", e),
            }
        }
        let last_evaluated_id = result
            .last_evaluated_key
            .unwrap_or_default()
            .get(&self.key_attribute)
            .and_then(|key| key.as_s().ok())
            .cloned();

        Ok(OrderPage {
            orders,
            last_evaluated_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DynamoDbOrderRepository, S3ObjectStore};
    use crate::configuration::Configuration;
    use crate::core::{ObjectStore, OrderRecord, OrderRepository};
    use crate::error::OrderError;
    use aws_sdk_dynamodb::operation::get_item::GetItemOutput;
    use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
    use aws_sdk_dynamodb::operation::scan::ScanOutput;
    use aws_sdk_dynamodb::types::error::ResourceNotFoundException;
    use aws_sdk_dynamodb::types::AttributeValue;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::get_object::{GetObjectError, GetObjectOutput};
    use aws_sdk_s3::primitives::ByteStream;
    use aws_sdk_s3::types::error::NoSuchKey;
    use aws_smithy_mocks::{mock, mock_client};
    use std::collections::HashMap;

    fn configuration() -> Configuration {
        Configuration {
            dynamodb_table: "orders-table".to_string(),
            order_key_attribute: "order_id".to_string(),
        }
    }

    #[tokio::test]
    async fn when_object_exists_should_return_its_bytes() {
        let get_object_rule = mock!(aws_sdk_s3::Client::get_object)
            .match_requests(|req| {
                req.bucket() == Some("orders-bucket") && req.key() == Some("incoming/A1.json")
            })
            .then_output(|| {
                GetObjectOutput::builder()
                    .body(ByteStream::from_static(br#"{"order_id": "A1"}"#))
                    .build()
            });
        let s3 = mock_client!(aws_sdk_s3, [&get_object_rule]);
        let store = S3ObjectStore::new(s3);

        let bytes = store
            .get_object("orders-bucket", "incoming/A1.json")
            .await
            .unwrap();

        assert_eq!(get_object_rule.num_calls(), 1);
        assert_eq!(bytes, br#"{"order_id": "A1"}"#.to_vec());
    }

    #[tokio::test]
    async fn when_object_is_missing_should_report_not_found() {
        let get_object_rule = mock!(aws_sdk_s3::Client::get_object)
            .then_error(|| GetObjectError::NoSuchKey(NoSuchKey::builder().build()));
        let s3 = mock_client!(aws_sdk_s3, [&get_object_rule]);
        let store = S3ObjectStore::new(s3);

        let result = store.get_object("orders-bucket", "missing.json").await;

        assert!(matches!(
            result,
            Err(OrderError::ObjectNotFound { bucket, key })
                if bucket == "orders-bucket" && key == "missing.json"
        ));
    }

    #[tokio::test]
    async fn when_access_is_denied_should_report_access_denied() {
        let get_object_rule = mock!(aws_sdk_s3::Client::get_object).then_error(|| {
            GetObjectError::generic(
                ErrorMetadata::builder()
                    .code("AccessDenied")
                    .message("Access Denied")
                    .build(),
            )
        });
        let s3 = mock_client!(aws_sdk_s3, [&get_object_rule]);
        let store = S3ObjectStore::new(s3);

        let result = store.get_object("orders-bucket", "private/A1.json").await;

        assert_eq!(get_object_rule.num_calls(), 1);
        assert!(matches!(
            result,
            Err(OrderError::ObjectAccessDenied { bucket, key })
                if bucket == "orders-bucket" && key == "private/A1.json"
        ));
    }

    #[tokio::test]
    async fn when_order_is_put_should_write_whole_item_without_condition() {
        let put_item_rule = mock!(aws_sdk_dynamodb::Client::put_item)
            .match_requests(|req| {
                let item = req.item().cloned().unwrap_or_default();
                req.table_name() == Some("orders-table")
                    && req.condition_expression().is_none()
                    && item.len() == 2
                    && item.get("orderId") == Some(&AttributeValue::S("A1".to_string()))
                    && item.get("qty") == Some(&AttributeValue::N("3".to_string()))
            })
            .then_output(|| PutItemOutput::builder().build());
        let dynamodb = mock_client!(aws_sdk_dynamodb, [&put_item_rule]);
        let repo = DynamoDbOrderRepository::new(&configuration(), dynamodb);
        let order = OrderRecord::from_slice(br#"{"orderId": "A1", "qty": 3}"#).unwrap();

        let result = repo.put_order(order).await;

        assert!(result.is_ok());
        assert_eq!(put_item_rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn when_table_write_fails_should_report_table_error() {
        let put_item_rule = mock!(aws_sdk_dynamodb::Client::put_item).then_error(|| {
            PutItemError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("Requested resource not found")
                    .build(),
            )
        });
        let dynamodb = mock_client!(aws_sdk_dynamodb, [&put_item_rule]);
        let repo = DynamoDbOrderRepository::new(&configuration(), dynamodb);
        let order = OrderRecord::from_slice(br#"{"order_id": "A1"}"#).unwrap();

        let result = repo.put_order(order).await;

        assert!(matches!(
            result,
            Err(OrderError::TableWrite { table, .. }) if table == "orders-table"
        ));
    }

    #[tokio::test]
    async fn when_order_is_missing_should_return_none() {
        let get_item_rule = mock!(aws_sdk_dynamodb::Client::get_item)
            .match_requests(|req| {
                req.key().and_then(|key| key.get("order_id"))
                    == Some(&AttributeValue::S("nope".to_string()))
            })
            .then_output(|| GetItemOutput::builder().build());
        let dynamodb = mock_client!(aws_sdk_dynamodb, [&get_item_rule]);
        let repo = DynamoDbOrderRepository::new(&configuration(), dynamodb);

        let result = repo.get_order("nope").await.unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn when_order_exists_should_return_record_with_exact_numbers() {
        let get_item_rule = mock!(aws_sdk_dynamodb::Client::get_item).then_output(|| {
            GetItemOutput::builder()
                .item("order_id", AttributeValue::S("A1".to_string()))
                .item("total", AttributeValue::N("19.99".to_string()))
                .build()
        });
        let dynamodb = mock_client!(aws_sdk_dynamodb, [&get_item_rule]);
        let repo = DynamoDbOrderRepository::new(&configuration(), dynamodb);

        let order = repo.get_order("A1").await.unwrap().unwrap();

        assert_eq!(order.get("total").unwrap().to_string(), "19.99");
    }

    #[tokio::test]
    async fn when_listing_should_pass_cursor_and_return_next_one() {
        let scan_rule = mock!(aws_sdk_dynamodb::Client::scan)
            .match_requests(|req| {
                req.limit() == Some(50)
                    && req
                        .exclusive_start_key()
                        .and_then(|key| key.get("order_id"))
                        == Some(&AttributeValue::S("A1".to_string()))
            })
            .then_output(|| {
                ScanOutput::builder()
                    .items(HashMap::from([(
                        "order_id".to_string(),
                        AttributeValue::S("A2".to_string()),
                    )]))
                    .items(HashMap::from([(
                        "receipt".to_string(),
                        AttributeValue::B(aws_sdk_dynamodb::primitives::Blob::new(vec![0u8])),
                    )]))
                    .last_evaluated_key("order_id", AttributeValue::S("A2".to_string()))
                    .build()
            });
        let dynamodb = mock_client!(aws_sdk_dynamodb, [&scan_rule]);
        let repo = DynamoDbOrderRepository::new(&configuration(), dynamodb);

        let page = repo.list_orders(Some("A1".to_string())).await.unwrap();

        assert_eq!(scan_rule.num_calls(), 1);
        assert_eq!(page.orders.len(), 1);
        assert_eq!(page.last_evaluated_id, Some("A2".to_string()));
    }
}
