use core::fmt;
use std::sync::PoisonError;

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    NotFound(String),
    DuplicateKey(String),
    StorageRead(String),
    StorageWrite(std::io::Error),
    Validation(String),
    ParseCommand(String),
    Json(serde_json::Error),
    Csv(csv::Error),
    Lock(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err)
    }
}

impl From<tempfile::PersistError> for AppError {
    fn from(err: tempfile::PersistError) -> Self {
        AppError::StorageWrite(err.error)
    }
}

impl<T> From<PoisonError<T>> for AppError {
    fn from(err: PoisonError<T>) -> Self {
        AppError::Lock(err.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => {
                write!(f, "I/O error while accessing a file or resource: {}", e)
            }
            AppError::NotFound(name) => {
                write!(f, "Contact '{}' not found", name)
            }
            AppError::DuplicateKey(name) => {
                write!(f, "Contact '{}' already exists", name)
            }
            AppError::StorageRead(msg) => {
                write!(f, "Could not read contact storage: {}", msg)
            }
            AppError::StorageWrite(e) => {
                write!(f, "Could not write contact storage: {}", e)
            }
            AppError::Validation(msg) => {
                write!(f, "Validation failed: {}", msg)
            }
            AppError::ParseCommand(cmd) => {
                write!(f, "Unrecognized command: '{}'", cmd)
            }
            AppError::Json(e) => {
                write!(f, "Invalid JSON: {}", e)
            }
            AppError::Csv(e) => {
                write!(f, "CSV error: {}", e)
            }
            AppError::Lock(msg) => {
                write!(f, "Contact store lock poisoned: {}", msg)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) | AppError::StorageWrite(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::Csv(e) => Some(e),
            _ => None,
        }
    }
}
