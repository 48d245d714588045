use figment::providers::Env;
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const DEFAULT_KEY_ATTRIBUTE: &str = "order_id";

/// Read once at cold start and handed to the adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub dynamodb_table: String,
    #[serde(default = "default_key_attribute")]
    pub order_key_attribute: String,
}

fn default_key_attribute() -> String {
    DEFAULT_KEY_ATTRIBUTE.to_string()
}

impl Configuration {
    pub fn load() -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::new().merge(Env::raw().only(&["DYNAMODB_TABLE", "ORDER_KEY_ATTRIBUTE"])),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        let config: Configuration = figment.extract()?;
        if config.dynamodb_table.trim().is_empty() {
            return Err(figment::Error::from("DYNAMODB_TABLE cannot be empty"));
        }
        Ok(config)
    }
}
