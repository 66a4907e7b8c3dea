pub use crate::cli::{command, run_app};
pub use crate::config::Config;
pub use crate::domain::{
    Contact, ContactBook, ContactManager, Search, SearchField, SharedContactManager,
};
pub use crate::errors::AppError;
pub use crate::storage::{ContactStore, CsvStorage, JsonStorage, MemStorage, StorageMedium};
