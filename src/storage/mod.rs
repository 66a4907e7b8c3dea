pub mod stores;

use crate::config::Config;
use crate::prelude::{AppError, ContactBook};
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use stores::{CsvStorage, JsonStorage, MemStorage};

pub trait ContactStore: Send {
    fn load(&self) -> Result<ContactBook, AppError>;

    fn save(&self, contacts: &ContactBook) -> Result<(), AppError>;

    fn get_medium(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMedium {
    Json,
    Mem,
}

impl StorageMedium {
    pub fn is_json(&self) -> bool {
        matches!(self, StorageMedium::Json)
    }

    pub fn is_which(&self) -> &str {
        if self.is_json() { "json" } else { "mem" }
    }
}

impl FromStr for StorageMedium {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(StorageMedium::Json),
            "mem" => Ok(StorageMedium::Mem),
            _ => Err(AppError::Validation(format!(
                "'{}' is not a recognized storage medium (json, mem)",
                s
            ))),
        }
    }
}

pub fn parse_storage_type(config: &Config) -> Box<dyn ContactStore> {
    match config.medium {
        StorageMedium::Json => Box::new(JsonStorage::new(&config.file)),
        StorageMedium::Mem => Box::new(MemStorage::default()),
    }
}

pub fn create_file_parent(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_storage_medium() -> Result<(), AppError> {
        assert_eq!("json".parse::<StorageMedium>()?, StorageMedium::Json);
        assert_eq!(" MEM ".parse::<StorageMedium>()?, StorageMedium::Mem);
        assert!(matches!(
            "txt".parse::<StorageMedium>(),
            Err(AppError::Validation(_))
        ));
        Ok(())
    }

    #[test]
    fn picks_backend_from_config() {
        let config = Config {
            medium: StorageMedium::Mem,
            ..Config::default()
        };
        assert_eq!(parse_storage_type(&config).get_medium(), "mem");

        let config = Config {
            medium: StorageMedium::Json,
            ..config
        };
        assert_eq!(parse_storage_type(&config).get_medium(), "json");
    }

    #[test]
    fn creates_missing_parent_directories() -> Result<(), AppError> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("nested/deeper/contactbook.json");

        create_file_parent(&file)?;

        assert!(dir.path().join("nested/deeper").is_dir());
        create_file_parent(Path::new("bare.json"))?;
        Ok(())
    }
}
