use crate::core::OrderRecord;
use crate::error::OrderError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Number, Serializer, Value};

const LOG_INDENT: &[u8] = b"    ";

impl OrderRecord {
    /// Decodes an uploaded object. Numbers keep their literal digits, so
    /// `19.99` is stored as exactly `19.99`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, OrderError> {
        let text = std::str::from_utf8(bytes)?;
        let value: Value = serde_json::from_str(text)?;
        OrderRecord::try_from(value)
    }

    /// Renders the record for the log. Fractional numbers are shown as
    /// binary floats; this output is never written anywhere else.
    pub fn to_log_json(&self) -> Result<String, OrderError> {
        let display = Value::Object(
            self.fields()
                .iter()
                .map(|(name, value)| (name.clone(), display_value(value)))
                .collect(),
        );

        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(LOG_INDENT));
        display.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn display_value(value: &Value) -> Value {
    match value {
        Value::Number(number) => Value::Number(display_number(number)),
        Value::Array(items) => Value::Array(items.iter().map(display_value).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), display_value(value)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn display_number(number: &Number) -> Number {
    let literal = number.to_string();
    if !literal.contains(['.', 'e', 'E']) {
        return number.clone();
    }
    // out of range values stay as written
    number
        .as_f64()
        .and_then(Number::from_f64)
        .unwrap_or_else(|| number.clone())
}
