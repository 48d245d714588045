use crate::error::OrderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

#[cfg(any(test, feature = "mocks"))]
use mockall::{automock, predicate::*};

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Debug {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, OrderError>;
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait OrderRepository: Debug {
    /// Stores the record as a whole item, replacing any item with the same key.
    async fn put_order(&self, order: OrderRecord) -> Result<(), OrderError>;
    async fn get_order(&self, order_id: &str) -> Result<Option<OrderRecord>, OrderError>;
    async fn list_orders(&self, last_evaluated_id: Option<String>)
        -> Result<OrderPage, OrderError>;
}

/// An order as uploaded by the producer. The shape is owned upstream, so the
/// record is kept as an untyped JSON object with numbers stored as their
/// literal decimal text.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct OrderRecord(Map<String, Value>);

impl OrderRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.0.get(attribute)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl TryFrom<Value> for OrderRecord {
    type Error = OrderError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            Value::Null => Err(OrderError::NotAnObject("null")),
            Value::Bool(_) => Err(OrderError::NotAnObject("a boolean")),
            Value::Number(_) => Err(OrderError::NotAnObject("a number")),
            Value::String(_) => Err(OrderError::NotAnObject("a string")),
            Value::Array(_) => Err(OrderError::NotAnObject("an array")),
        }
    }
}

#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct OrderPage {
    pub orders: Vec<OrderRecord>,
    pub last_evaluated_id: Option<String>,
}
