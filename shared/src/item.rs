use crate::core::OrderRecord;
use crate::error::OrderError;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

impl From<&OrderRecord> for HashMap<String, AttributeValue> {
    fn from(order: &OrderRecord) -> Self {
        order
            .fields()
            .iter()
            .map(|(name, value)| (name.clone(), to_attribute_value(value)))
            .collect()
    }
}

impl TryFrom<HashMap<String, AttributeValue>> for OrderRecord {
    type Error = OrderError;

    fn try_from(item: HashMap<String, AttributeValue>) -> Result<Self, Self::Error> {
        let fields = item
            .into_iter()
            .map(|(name, value)| from_attribute_value(&name, value).map(|value| (name, value)))
            .collect::<Result<Map<String, Value>, OrderError>>()?;
        Ok(OrderRecord::new(fields))
    }
}

pub fn to_attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        // literal digits, never routed through f64
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(to_attribute_value).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), to_attribute_value(value)))
                .collect(),
        ),
    }
}

pub fn from_attribute_value(name: &str, value: AttributeValue) -> Result<Value, OrderError> {
    let value = match value {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::N(n) => Value::Number(parse_number(name, &n)?),
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::Ss(strings) => Value::Array(strings.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(numbers) => Value::Array(
            numbers
                .iter()
                .map(|n| parse_number(name, n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::L(items) => Value::Array(
            items
                .into_iter()
                .map(|item| from_attribute_value(name, item))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(field, value)| from_attribute_value(&field, value).map(|v| (field, v)))
                .collect::<Result<_, _>>()?,
        ),
        _ => return Err(OrderError::UnsupportedAttribute(name.to_string())),
    };
    Ok(value)
}

fn parse_number(name: &str, digits: &str) -> Result<Number, OrderError> {
    serde_json::from_str(digits).map_err(|_| OrderError::UnsupportedAttribute(name.to_string()))
}
