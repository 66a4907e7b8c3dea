use super::*;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Value half of a stored entry. The name is the key of the JSON object, so it
/// never appears inside the record.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ContactRecord {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize)]
pub(crate) struct ContactRecordRef<'a> {
    pub phone: &'a str,
    pub email: &'a str,
}

pub fn required_msg(field: &str) -> String {
    format!("{} must not be empty", field)
}

impl Contact {
    /// Builds a contact from raw input. Every field is trimmed and must be
    /// non-empty afterwards.
    pub fn new(name: &str, phone: &str, email: &str) -> Result<Self, AppError> {
        Ok(Contact {
            name: required("Name", name)?,
            phone: required("Phone", phone)?,
            email: required("Email", email)?,
        })
    }

    pub(crate) fn from_record(name: String, record: ContactRecord) -> Self {
        Contact {
            name,
            phone: record.phone,
            email: record.email,
        }
    }

    pub(crate) fn as_record(&self) -> ContactRecordRef<'_> {
        ContactRecordRef {
            phone: &self.phone,
            email: &self.email,
        }
    }

    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str, field: SearchField) -> bool {
        let hit = |value: &str| value.to_lowercase().contains(needle);

        match field {
            SearchField::Name => hit(&self.name),
            SearchField::Phone => hit(&self.phone),
            SearchField::Email => hit(&self.email),
            SearchField::All => hit(&self.name) || hit(&self.phone) || hit(&self.email),
        }
    }
}

pub(crate) fn required(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(required_msg(field)));
    }
    Ok(value.to_string())
}
