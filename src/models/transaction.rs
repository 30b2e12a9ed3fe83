//! Transaction models

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Type tag the app stamps on every transfer it records
pub const SINPE_MOVIL_TYPE: &str = "SINPE móvil";

/// Recipient identity copied into a transaction at creation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRef {
    pub name: String,
    pub last_name: String,
}

impl ContactRef {
    pub fn new(name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name).trim().to_string()
    }

    /// Two-letter badge shown next to the contact ("AL" for Ana Lopez)
    pub fn initials(&self) -> String {
        self.name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// A money movement as stored by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Empty until the gateway assigns one
    #[serde(default)]
    pub transaction_id: String,
    #[serde(deserialize_with = "amount::deserialize")]
    pub amount: i64,
    #[serde(with = "created_at")]
    pub created_at: DateTime<Utc>,
    pub contact: ContactRef,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Transaction {
    /// Build the record for a new transfer; `transaction_id` stays empty
    pub fn new_transfer(
        amount: i64,
        contact: ContactRef,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id: String::new(),
            amount,
            created_at,
            contact,
            description: description.into(),
            kind: SINPE_MOVIL_TYPE.to_string(),
        }
    }
}

/// `createdAt` is RFC 3339 on the wire; older records carry a bare date
mod created_at {
    use super::*;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid createdAt: {}", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// The gateway has returned amounts both as numbers and as numeric strings
mod amount {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid amount: {}", s))),
        }
    }
}

#[cfg(test)]
pub(crate) fn parse_created_at(raw: &str) -> DateTime<Utc> {
    created_at::parse(raw).expect("valid test timestamp")
}
