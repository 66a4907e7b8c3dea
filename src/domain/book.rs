use super::*;

use super::contact::{ContactRecord, required};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, btree_map};

/// Which contact field a search query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Name,
    Phone,
    Email,
    All,
}

/// All contacts keyed by name. Every key equals the `name` of its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactBook {
    contacts: BTreeMap<String, Contact>,
}

impl ContactBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Contact> {
        self.contacts.get(name)
    }

    /// Contacts in name order.
    pub fn iter(&self) -> btree_map::Values<'_, String, Contact> {
        self.contacts.values()
    }

    pub fn insert(&mut self, contact: Contact) -> Result<(), AppError> {
        match self.contacts.entry(contact.name.clone()) {
            btree_map::Entry::Occupied(_) => Err(AppError::DuplicateKey(contact.name)),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(contact);
                Ok(())
            }
        }
    }

    /// Replaces the provided fields and returns the contact as it was before.
    /// Nothing is changed when any argument is invalid.
    pub fn update(
        &mut self,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<Contact, AppError> {
        let phone = phone.map(|p| required("Phone", p)).transpose()?;
        let email = email.map(|e| required("Email", e)).transpose()?;

        let contact = self
            .contacts
            .get_mut(name)
            .ok_or_else(|| AppError::NotFound(name.to_string()))?;
        let previous = contact.clone();

        if let Some(phone) = phone {
            contact.phone = phone;
        }
        if let Some(email) = email {
            contact.email = email;
        }

        Ok(previous)
    }

    pub fn remove(&mut self, name: &str) -> Result<Contact, AppError> {
        self.contacts
            .remove(name)
            .ok_or_else(|| AppError::NotFound(name.to_string()))
    }

    /// Puts a contact back unconditionally, replacing any entry with the same name.
    pub(crate) fn restore(&mut self, contact: Contact) {
        self.contacts.insert(contact.name.clone(), contact);
    }

    pub fn search(&self, query: &str, field: SearchField) -> Search<'_> {
        Search {
            needle: query.trim().to_lowercase(),
            field,
            inner: self.contacts.values(),
        }
    }
}

/// Later contacts with an already seen name replace earlier ones.
impl FromIterator<Contact> for ContactBook {
    fn from_iter<I: IntoIterator<Item = Contact>>(iter: I) -> Self {
        let mut book = ContactBook::new();
        for contact in iter {
            book.restore(contact);
        }
        book
    }
}

impl<'a> IntoIterator for &'a ContactBook {
    type Item = &'a Contact;
    type IntoIter = btree_map::Values<'a, String, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy case-insensitive substring search over a [`ContactBook`].
///
/// Nothing is matched until the iterator is advanced. Cloning a fresh
/// `Search` gives an independent pass over the same book.
#[derive(Debug, Clone)]
pub struct Search<'a> {
    needle: String,
    field: SearchField,
    inner: btree_map::Values<'a, String, Contact>,
}

impl<'a> Iterator for Search<'a> {
    type Item = &'a Contact;

    fn next(&mut self) -> Option<Self::Item> {
        let needle = &self.needle;
        let field = self.field;
        self.inner.by_ref().find(|c| c.matches(needle, field))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl std::iter::FusedIterator for Search<'_> {}

// On disk the book is a JSON object: name -> { "phone": .., "email": .. }
impl Serialize for ContactBook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.contacts.len()))?;
        for (name, contact) in &self.contacts {
            map.serialize_entry(name, &contact.as_record())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ContactBook {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = BTreeMap::<String, ContactRecord>::deserialize(deserializer)?;

        let contacts = records
            .into_iter()
            .map(|(name, record)| {
                let name = name.trim().to_string();
                (name.clone(), Contact::from_record(name, record))
            })
            .collect();

        Ok(ContactBook { contacts })
    }
}
