use super::*;

use crate::prelude::Contact;
use csv::{Reader, Writer};
use log::debug;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

pub const DEFAULT_CSV_SRC: &str = "./csv/contacts.csv";
pub const DEFAULT_CSV_DEST: &str = "./csv/exported.csv";
const EXPORT_FILE_NAME: &str = "exported.csv";

pub struct JsonStorage {
    pub medium: String,
    pub path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            medium: "json".to_string(),
            path: path.into(),
        }
    }
}

#[derive(Default)]
pub struct MemStorage {
    data: Mutex<ContactBook>,
}

impl MemStorage {
    pub fn with_contacts(contacts: ContactBook) -> Self {
        Self {
            data: Mutex::new(contacts),
        }
    }
}

pub struct CsvStorage {
    pub medium: String,
    pub src: PathBuf,
    pub dest: PathBuf,
}

impl CsvStorage {
    pub fn new(src: Option<&str>, dest: Option<&str>) -> Result<Self, AppError> {
        let mut dest = PathBuf::from(dest.unwrap_or(DEFAULT_CSV_DEST));

        if dest.is_dir() {
            dest = dest.join(EXPORT_FILE_NAME);
        } else if dest.extension().is_none_or(|ext| ext != "csv") {
            return Err(AppError::Validation(
                "Export file must be a .csv file".to_string(),
            ));
        }

        Ok(Self {
            medium: "csv".to_string(),
            src: PathBuf::from(src.unwrap_or(DEFAULT_CSV_SRC)),
            dest,
        })
    }
}

impl ContactStore for JsonStorage {
    fn load(&self) -> Result<ContactBook, AppError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no contact file at {}, starting empty", self.path.display());
                return Ok(ContactBook::new());
            }
            Err(e) => {
                return Err(AppError::StorageRead(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        // serde_json will give an error if data is empty
        if data.trim().is_empty() {
            return Ok(ContactBook::new());
        }

        let book: ContactBook = serde_json::from_str(&data).map_err(|e| {
            AppError::StorageRead(format!("{}: {}", self.path.display(), e))
        })?;

        debug!(
            "loaded {} contacts from {}",
            book.len(),
            self.path.display()
        );
        Ok(book)
    }

    fn save(&self, contacts: &ContactBook) -> Result<(), AppError> {
        create_file_parent(&self.path).map_err(AppError::StorageWrite)?;

        // Write next to the target and rename over it, so a crash never leaves
        // a half-written contact file behind.
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir).map_err(AppError::StorageWrite)?;

        let mut serializer =
            Serializer::with_formatter(&mut file, PrettyFormatter::with_indent(b"    "));
        contacts
            .serialize(&mut serializer)
            .map_err(|e| AppError::StorageWrite(e.into()))?;
        file.write_all(b"\n").map_err(AppError::StorageWrite)?;
        file.as_file().sync_all().map_err(AppError::StorageWrite)?;

        // Temp files are created owner-only; keep the mode of the file being replaced.
        if let Ok(metadata) = fs::metadata(&self.path) {
            file.as_file()
                .set_permissions(metadata.permissions())
                .map_err(AppError::StorageWrite)?;
        }

        file.persist(&self.path)?;

        debug!("saved {} contacts to {}", contacts.len(), self.path.display());
        Ok(())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }
}

impl ContactStore for MemStorage {
    fn load(&self) -> Result<ContactBook, AppError> {
        Ok(self.data.lock()?.clone())
    }

    fn save(&self, contacts: &ContactBook) -> Result<(), AppError> {
        *self.data.lock()? = contacts.clone();
        Ok(())
    }

    fn get_medium(&self) -> &str {
        "mem"
    }
}

impl ContactStore for CsvStorage {
    fn get_medium(&self) -> &str {
        &self.medium
    }

    fn load(&self) -> Result<ContactBook, AppError> {
        Ok(self.read_rows()?.into_iter().collect())
    }

    fn save(&self, contacts: &ContactBook) -> Result<(), AppError> {
        self.write_rows(contacts.iter())?;
        Ok(())
    }
}

impl CsvStorage {
    /// Every row of the source file, in file order and with duplicates kept.
    pub fn read_rows(&self) -> Result<Vec<Contact>, AppError> {
        if !self.src.exists() {
            return Err(AppError::StorageRead(format!(
                "CSV file {} does not exist",
                self.src.display()
            )));
        }

        if self.src.extension().is_some_and(|ext| ext != "csv") {
            return Err(AppError::Validation("File not .csv".to_string()));
        }

        let mut reader = Reader::from_path(&self.src)?;

        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let record: Contact = result?;
            rows.push(record);
        }

        Ok(rows)
    }

    pub fn write_rows<'a>(
        &self,
        contacts: impl IntoIterator<Item = &'a Contact>,
    ) -> Result<usize, AppError> {
        create_file_parent(&self.dest)?;

        let mut writer = Writer::from_path(&self.dest)?;

        let mut counter = 0;
        for contact in contacts {
            writer.serialize(contact)?;
            counter += 1;
        }

        writer.flush()?;

        Ok(counter)
    }
}
