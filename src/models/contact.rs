//! Address book models

use serde::{Deserialize, Serialize};

use super::transaction::ContactRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub number: String,
    #[serde(default)]
    pub label: String,
}

/// One address book entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_numbers: Vec<PhoneNumber>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name).trim().to_string()
    }

    /// The name pair embedded into a transaction sent to this contact
    pub fn as_recipient(&self) -> ContactRef {
        ContactRef::new(self.name.clone(), self.last_name.clone())
    }
}

/// Contacts sharing the first letter of their name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactGroup {
    pub letter: char,
    pub contacts: Vec<Contact>,
}
