use super::*;

use crate::storage::CsvStorage;
use log::{info, warn};
use std::path::PathBuf;

/// The contact store: an in-memory [`ContactBook`] written back to its
/// storage after every change.
pub struct ContactManager {
    book: ContactBook,
    storage: Box<dyn ContactStore>,
}

impl ContactManager {
    /// Loads the book from `storage`. Unreadable or malformed data is logged
    /// and replaced by an empty book.
    pub fn open(storage: Box<dyn ContactStore>) -> Self {
        let book = match storage.load() {
            Ok(book) => book,
            Err(e) => {
                warn!("{}; starting with an empty contact book", e);
                ContactBook::new()
            }
        };

        info!(
            "opened {} contact book with {} contacts",
            storage.get_medium(),
            book.len()
        );
        Self { book, storage }
    }

    pub fn book(&self) -> &ContactBook {
        &self.book
    }

    pub fn get(&self, name: &str) -> Option<&Contact> {
        self.book.get(name.trim())
    }

    pub fn list(&self) -> impl Iterator<Item = &Contact> {
        self.book.iter()
    }

    pub fn search(&self, query: &str, field: SearchField) -> Search<'_> {
        self.book.search(query, field)
    }

    /// Adds a new contact. An existing name is never overwritten.
    pub fn add_contact(&mut self, name: &str, phone: &str, email: &str) -> Result<(), AppError> {
        let contact = Contact::new(name, phone, email)?;
        let name = contact.name.clone();

        self.book.insert(contact)?;

        if let Err(e) = self.save() {
            self.book.remove(&name)?;
            return Err(e);
        }

        info!("added contact {}", name);
        Ok(())
    }

    /// Replaces whichever of `phone` and `email` are given and returns the
    /// updated contact.
    pub fn update_contact(
        &mut self,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<Contact, AppError> {
        let name = name.trim();
        let previous = self.book.update(name, phone, email)?;

        if let Err(e) = self.save() {
            self.book.restore(previous);
            return Err(e);
        }

        info!("updated contact {}", name);
        self.book
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(name.to_string()))
    }

    pub fn delete_contact(&mut self, name: &str) -> Result<Contact, AppError> {
        let removed = self.book.remove(name.trim())?;

        if let Err(e) = self.save() {
            self.book.restore(removed);
            return Err(e);
        }

        info!("deleted contact {}", removed.name);
        Ok(removed)
    }

    /// Adds every valid row of a CSV file whose name is not taken yet.
    /// Returns how many rows were imported and how many were skipped.
    pub fn import_contacts_from_csv(
        &mut self,
        src: Option<&str>,
    ) -> Result<(usize, usize), AppError> {
        let rows = CsvStorage::new(src, None)?.read_rows()?;

        let mut imported: Vec<String> = Vec::new();
        let mut skipped = 0;

        for row in rows {
            let inserted = Contact::new(&row.name, &row.phone, &row.email)
                .and_then(|contact| {
                    let name = contact.name.clone();
                    self.book.insert(contact).map(|_| name)
                });

            match inserted {
                Ok(name) => imported.push(name),
                Err(e) => {
                    warn!("skipping csv row {:?}: {}", row.name, e);
                    skipped += 1;
                }
            }
        }

        if let Err(e) = self.save() {
            for name in &imported {
                self.book.remove(name)?;
            }
            return Err(e);
        }

        info!("imported {} contacts, skipped {}", imported.len(), skipped);
        Ok((imported.len(), skipped))
    }

    pub fn export_contacts_to_csv(&self, des: Option<&str>) -> Result<(PathBuf, usize), AppError> {
        let storage = CsvStorage::new(None, des)?;
        let total = storage.write_rows(self.book.iter())?;
        Ok((storage.dest, total))
    }

    /// Writes the whole book to storage, replacing what was there.
    pub fn save(&self) -> Result<(), AppError> {
        self.storage.save(&self.book)
    }

    /// Final save before the manager goes away.
    pub fn close(self) -> Result<(), AppError> {
        self.save()?;
        info!("closed contact book with {} contacts", self.book.len());
        Ok(())
    }
}
