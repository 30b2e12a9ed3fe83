use std::collections::BTreeMap;
use std::path::Path;

use tracing::{info, warn};

use crate::models::{Contact, ContactGroup};
use crate::utils::SinpeError;

/// Country prefix stripped before matching phone searches
const COSTA_RICA_PREFIX: &str = "506";

/// Read-only address book, kept sorted by full name
#[derive(Debug, Clone, Default)]
pub struct ContactBook {
    contacts: Vec<Contact>,
}

impl ContactBook {
    pub fn new(mut contacts: Vec<Contact>) -> Self {
        contacts.sort_by_cached_key(|c| c.full_name().to_lowercase());
        Self { contacts }
    }

    /// Load a JSON array of contacts. A missing file is an empty book.
    pub fn load(path: &Path) -> Result<Self, SinpeError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Contacts file {} not found, starting with no contacts", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(SinpeError::ContactBook(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let contacts: Vec<Contact> = serde_json::from_str(&raw).map_err(|e| {
            SinpeError::ContactBook(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        info!("Loaded {} contacts from {}", contacts.len(), path.display());
        Ok(Self::new(contacts))
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn get(&self, contact_id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == contact_id)
    }

    /// Contacts whose full name contains `term` (case-insensitive) or whose
    /// phone digits contain the digits of `term`. An empty term matches all.
    pub fn search(&self, term: &str) -> Vec<&Contact> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.contacts.iter().collect();
        }
        let term_digits = digits(&term);

        self.contacts
            .iter()
            .filter(|c| {
                c.full_name().to_lowercase().contains(&term)
                    || (!term_digits.is_empty()
                        && c.phone_numbers.iter().any(|p| local_digits(&p.number).contains(&term_digits)))
            })
            .collect()
    }

    /// Matches of `term` grouped by the uppercase first letter of the name
    pub fn grouped(&self, term: &str) -> Vec<ContactGroup> {
        let mut groups: BTreeMap<char, Vec<Contact>> = BTreeMap::new();
        for contact in self.search(term) {
            let letter = contact
                .name
                .chars()
                .next()
                .and_then(|c| c.to_uppercase().next())
                .unwrap_or('#');
            groups.entry(letter).or_default().push(contact.clone());
        }

        groups
            .into_iter()
            .map(|(letter, contacts)| ContactGroup { letter, contacts })
            .collect()
    }
}

fn digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Phone digits without the country prefix ("+506 8888-1234" -> "88881234")
fn local_digits(number: &str) -> String {
    let all = digits(number);
    if number.trim_start().starts_with('+') {
        if let Some(local) = all.strip_prefix(COSTA_RICA_PREFIX) {
            return local.to_string();
        }
    }
    all
}
