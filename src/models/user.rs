//! Account holder models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The account the app tracks. Only `amount` is ever changed by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub last_name: String,
    pub amount: i64,
    /// Fields the client does not model; sent back untouched on update
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name).trim().to_string()
    }

    /// Copy of this record with the balance replaced
    pub fn with_amount(&self, amount: i64) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}
